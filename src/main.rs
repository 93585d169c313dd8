//! Demo: un registro de servicios inyectado en dos tipos con distintas
//! formas de inicializador.

use std::sync::Arc;

use infusion::config::InfusionConfig;
use infusion::errors::InfusionError;
use infusion::{dependencies, Arguments, ParameterShape, Registry, TargetType};
use serde_json::json;

fn services() -> Arc<Registry> {
    let registry = Registry::new();
    registry.register("logger", json!({"level": "info"}));
    registry.namespace("mail").register("host", "smtp.local").register("port", 2525);
    registry.register_memoized("clock", || json!({"epoch": 0}));
    Arc::new(registry)
}

fn run() -> Result<(), InfusionError> {
    let config = InfusionConfig::from_env()?;
    let import = config.configure(infusion::with_shared(services()));

    // Mailer(to) con dependencias públicas y un alias
    let mailer = TargetType::class("Mailer").initializer(ParameterShape::new().required("to"), |instance, inv| {
                                                inv.store_bindings(instance);
                                                inv.forward(instance)
                                            })
                                            .build();
    let mailer = import.public(dependencies!["logger", "mail.host"; { "smtp_port" => "mail.port" }])?.apply(&mailer)?;

    let instance = mailer.instantiate(Arguments::new().positional("ops@example.org"))?;
    println!("Mailer -> {}", instance.snapshot());
    println!("Mailer.host (public) -> {}", instance.read("host")?);

    // Subclase con inyección propia que sobreescribe el logger
    let audited = TargetType::subclass("AuditedMailer", &mailer).build();
    let audited = import.inject(["clock"])?.apply(&audited)?;
    let instance = audited.instantiate(Arguments::new().positional("audit@example.org").named("logger", "stderr"))?;
    println!("AuditedMailer -> {}", instance.snapshot());
    match instance.read("clock") {
        Ok(v) => println!("AuditedMailer.clock -> {v}"),
        Err(e) => println!("AuditedMailer.clock -> {e}"),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
