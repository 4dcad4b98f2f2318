//! Emits one compilation unit for several target platforms.
//!
//! Shows how platform tags prune definitions and variants, and how a
//! surviving definition referencing a pruned one is removed with it and
//! reported as a warning.
//!
//! Run with: `cargo run --example platform_matrix`

use anyhow::Result;
use typeweld::prelude::*;

fn sample_unit() -> Vec<TypeDefinition> {
    let mut keychain = StructDef::new("KeychainEntry");
    keychain.attrs.add_target_os("macos");
    keychain.attrs.add_target_os("ios");
    keychain.add_field(Field::new("service", TypeReference::Primitive(Primitive::Str)));

    let mut secrets = StructDef::new("SecretStore");
    secrets.add_field(Field::new(
        "entries",
        TypeReference::sequence(TypeReference::named("KeychainEntry")),
    ));

    let mut backend = EnumDef::new("StorageBackend");
    backend.add_variant(EnumVariant::unit("Memory"));
    let mut keychain_variant = EnumVariant::unit("Keychain");
    keychain_variant.attrs.add_target_os("macos");
    keychain_variant.attrs.add_target_os("ios");
    backend.add_variant(keychain_variant);
    let mut registry_variant = EnumVariant::unit("Registry");
    registry_variant.attrs.add_target_os("windows");
    backend.add_variant(registry_variant);

    let mut settings = StructDef::new("Settings");
    settings.add_field(Field::new("backend", TypeReference::named("StorageBackend")));

    vec![
        TypeDefinition::Struct(keychain),
        TypeDefinition::Struct(secrets),
        TypeDefinition::Enum(backend),
        TypeDefinition::Struct(settings),
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = ScalarCodecRegistry::default();
    let platforms = [None, Some("macos"), Some("windows"), Some("wasm")];

    for platform in platforms {
        let mut config = EngineConfig::default();
        config.requested_platform = platform.map(str::to_string);

        let unit = emit_unit(&sample_unit(), &config, &registry)?;
        println!("platform {}:", platform.unwrap_or("<none>"));
        for event in &unit.events {
            println!("  emits {}", event.name());
        }
        for warning in &unit.warnings {
            println!(
                "  warns {} removed ({} was dropped)",
                warning.definition, warning.referenced
            );
        }
        println!();
    }
    Ok(())
}
