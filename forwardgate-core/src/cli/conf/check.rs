use crate::conf::{ConfigError, config_error_hint, load_config};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            let resolver = &cfg.resolver;
            println!("✔ Config loaded successfully");
            println!(
                "✔ {} trusted networks: {}",
                resolver.networks().len(),
                resolver.networks()
            );
            println!(
                "✔ unix socket peers {}",
                if resolver.allow_empty_source() {
                    "trusted"
                } else {
                    "not trusted"
                }
            );
            if resolver.use_forwarded() {
                println!("✔ reading RFC 7239 Forwarded header");
            } else {
                println!(
                    "✔ reading legacy headers: for={}, proto={}",
                    resolver.for_header().unwrap_or("-"),
                    resolver.proto_header().unwrap_or("-")
                );
            }

            if cfg.validation.has_warnings() {
                println!();
                if plain {
                    cfg.validation.render_plain();
                } else {
                    cfg.validation.render_pretty();
                }
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: ConfigError, plain: bool) {
    let hint = config_error_hint(&err);
    if plain {
        eprintln!("error: {}", err);
    } else {
        eprintln!();
        eprintln!("{}: {}", "error".red().bold(), err);
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}
