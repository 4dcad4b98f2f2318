//! Example writer rendering an emission stream as Python source.
//!
//! Builds a small compilation unit, runs it through the engine and turns
//! the resulting events into Python classes. The writer never looks at
//! the input definitions; everything it needs arrives on the events.
//!
//! Run with: `cargo run --example emit_python`

use anyhow::Result;
use typeweld::prelude::*;

/// Maps a resolved type reference onto Python annotation text.
fn python_type(ty: &TypeReference) -> String {
    match ty {
        TypeReference::Primitive(primitive) => match primitive {
            Primitive::Bool => "bool".to_string(),
            Primitive::I8
            | Primitive::I16
            | Primitive::I32
            | Primitive::I64
            | Primitive::U8
            | Primitive::U16
            | Primitive::U32
            | Primitive::U64 => "int".to_string(),
            Primitive::F32 | Primitive::F64 => "float".to_string(),
            Primitive::Str => "str".to_string(),
            Primitive::Bytes => "bytes".to_string(),
            Primitive::Timestamp => "datetime.datetime".to_string(),
        },
        TypeReference::Named(name) => name.clone(),
        TypeReference::Optional(inner) => format!("Optional[{}]", python_type(inner)),
        TypeReference::Sequence(inner) => format!("List[{}]", python_type(inner)),
        TypeReference::Mapping(key, value) => {
            format!("Dict[{}, {}]", python_type(key), python_type(value))
        }
        TypeReference::External { qualifier, name } => format!("{qualifier}.{name}"),
    }
}

fn print_comments(comments: &[String], indent: &str) {
    for line in comments {
        println!("{indent}# {line}");
    }
}

fn print_fields(fields: &[FieldSpec]) {
    if fields.is_empty() {
        println!("    pass");
        return;
    }
    for field in fields {
        print_comments(&field.comments, "    ");
        let annotation = python_type(&field.ty);
        if field.optional {
            println!("    {}: {} = None", field.ident, annotation);
        } else {
            println!("    {}: {}", field.ident, annotation);
        }
    }
}

/// Renders events one by one. The only state carried between events is
/// the pending union: the carrier announces its members, and the union
/// alias can only be printed once the last member class exists.
struct PythonWriter {
    pending_union: Option<(String, Vec<String>)>,
    variants_left: usize,
}

impl PythonWriter {
    fn new() -> Self {
        Self { pending_union: None, variants_left: 0 }
    }

    fn render(&mut self, event: &EmitEvent) {
        match event {
            EmitEvent::Struct(def) => {
                print_comments(&def.comments, "");
                println!("class {}:", def.name);
                print_fields(&def.fields);
                println!();
            }
            EmitEvent::SyntheticContainer(def) => {
                print_comments(&def.comments, "");
                println!("class {}:", def.name);
                print_fields(&def.fields);
                println!();
            }
            EmitEvent::EnumDiscriminants(def) => {
                print_comments(&def.comments, "");
                println!("class {}:", def.name);
                for (constant, discriminant) in &def.constants {
                    println!("    {} = \"{}\"", constant, discriminant);
                }
                println!();
                self.pending_union = Some((def.enum_name.clone(), def.union_members.clone()));
                self.variants_left = def.union_members.len();
            }
            EmitEvent::EnumVariant(def) => {
                print_comments(&def.comments, "");
                println!("class {}:", def.name);
                println!(
                    "    {}: str = {}.{}",
                    def.discriminant_key, def.enum_name, def.constant
                );
                if let Some(payload) = &def.payload {
                    println!("    {}: {}", payload.key, python_type(&payload.ty));
                }
                println!();
                self.variants_left = self.variants_left.saturating_sub(1);
                if self.variants_left == 0 {
                    if let Some((name, members)) = self.pending_union.take() {
                        println!("{} = Union[{}]", name, members.join(", "));
                        println!();
                    }
                }
            }
            EmitEvent::Alias(def) => {
                print_comments(&def.comments, "");
                println!("{} = {}", def.name, python_type(&def.target));
                println!();
            }
            EmitEvent::Const(def) => {
                print_comments(&def.comments, "");
                println!("{} = {}", def.name, def.literal);
                println!();
            }
        }
    }
}

fn sample_unit() -> Vec<TypeDefinition> {
    let mut user = StructDef::new("User");
    user.comments.push("A registered user.".to_string());
    user.attrs.rename_all = Some(CaseConvention::Camel);
    user.add_field(Field::new("display_name", TypeReference::Primitive(Primitive::Str)));
    user.add_field(Field::new(
        "avatar",
        TypeReference::optional(TypeReference::Primitive(Primitive::Bytes)),
    ));
    let mut joined = Field::new("joined_at", TypeReference::Primitive(Primitive::Timestamp));
    joined.comments.push("UTC, whole seconds.".to_string());
    user.add_field(joined);

    let mut account = StructDef::new("Account");
    account.add_field(Field::new("owner", TypeReference::named("User")));
    account.add_field(Field::new(
        "aliases",
        TypeReference::sequence(TypeReference::Primitive(Primitive::Str)),
    ));

    let mut event = EnumDef::new("AccountEvent");
    event.comments.push("Events recorded against an account.".to_string());
    event.add_variant(EnumVariant::unit("Opened"));
    event.add_variant(EnumVariant::new(
        "Renamed",
        VariantShape::Tuple(TypeReference::Primitive(Primitive::Str)),
    ));
    event.add_variant(EnumVariant::new(
        "Transferred",
        VariantShape::AnonymousStruct(vec![
            Field::new("from_owner", TypeReference::named("User")),
            Field::new("to_owner", TypeReference::named("User")),
        ]),
    ));

    vec![
        TypeDefinition::Const(ConstDef::new("MAX_ALIASES", ConstValue::Int(16))),
        TypeDefinition::Const(ConstDef::new(
            "WINDOWS_ROOT",
            ConstValue::Str("C:\\Users\\default".to_string()),
        )),
        TypeDefinition::Alias(AliasDef::new(
            "AccountId",
            TypeReference::Primitive(Primitive::U64),
        )),
        TypeDefinition::Enum(event),
        TypeDefinition::Struct(account),
        TypeDefinition::Struct(user),
    ]
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = EngineConfig::default();
    let registry = ScalarCodecRegistry::default();
    let unit = emit_unit(&sample_unit(), &config, &registry)?;

    println!("# Generated by typeweld, do not edit.");
    println!();
    let mut writer = PythonWriter::new();
    for event in &unit.events {
        writer.render(event);
    }

    for warning in &unit.warnings {
        eprintln!(
            "warning: {} removed, referenced dropped {}",
            warning.definition, warning.referenced
        );
    }
    Ok(())
}
