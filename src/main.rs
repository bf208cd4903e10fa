// SPDX-License-Identifier: MPL-2.0
use bourbon_i18n::config;
use bourbon_i18n::error::{Error, Result};
use bourbon_i18n::i18n::{Catalog, Locale, Session};
use bourbon_i18n::storage::PreferenceStore;
use bourbon_i18n::{logging, paths};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

const HELP: &str = "\
bourbon-i18n: inspect Bourbon Web translations and the saved locale

USAGE:
  bourbon-i18n [OPTIONS] <COMMAND>

COMMANDS:
  locales          List supported locales
  get              Print the saved locale
  set <LOCALE>     Save a locale
  t <KEY>...       Translate keys with the saved locale
  check            Report missing translations (exit 1 when incomplete)

OPTIONS:
  --lang <LOCALE>        Translate with LOCALE without saving it (t only)
  --config-dir <DIR>     Directory containing settings.toml
  --data-dir <DIR>       Directory holding saved preferences
  --catalog-dir <DIR>    Use <locale>.toml files from DIR instead of the bundled catalog
  -h, --help             Print this help
";

struct Flags {
    lang: Option<String>,
    catalog_dir: Option<PathBuf>,
    command: Option<String>,
    rest: Vec<String>,
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    match parse_flags(args).and_then(run) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags> {
    let lang = args.opt_value_from_str("--lang")?;
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let data_dir: Option<PathBuf> = args.opt_value_from_str("--data-dir")?;
    let catalog_dir = args.opt_value_from_str("--catalog-dir")?;
    let command = args.subcommand()?;
    let rest = args
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| Error::Usage(format!("argument is not valid UTF-8: {arg:?}")))
        })
        .collect::<Result<Vec<_>>>()?;

    paths::init_cli_overrides(data_dir, config_dir);

    Ok(Flags {
        lang,
        catalog_dir,
        command,
        rest,
    })
}

fn run(flags: Flags) -> Result<ExitCode> {
    let (mut cfg, warning) = config::load();
    logging::init(cfg.log_filter());
    if let Some(warning) = warning {
        warn!("{warning}");
    }
    if let Some(dir) = flags.catalog_dir {
        cfg.catalog.dir = Some(dir);
    }

    let catalog = cfg.load_catalog()?;
    let store = cfg.preference_store();

    match flags.command.as_deref() {
        Some("locales") => {
            expect_no_args(&flags.rest)?;
            list_locales(&catalog, store);
        }
        Some("get") => {
            expect_no_args(&flags.rest)?;
            let session = Session::mount_restored(&catalog, store);
            println!("{}", session.current_locale());
        }
        Some("set") => {
            let [tag] = flags.rest.as_slice() else {
                return Err(Error::Usage("set takes exactly one locale".into()));
            };
            let locale = Locale::canonicalize(tag).map_err(|e| Error::Usage(e.to_string()))?;
            let mut session = Session::mount_restored(&catalog, store);
            session.set_locale(locale);
            info!(%locale, "saved locale");
            println!("{locale}");
        }
        Some("t") => {
            if flags.rest.is_empty() {
                return Err(Error::Usage("t needs at least one key".into()));
            }
            translate(&catalog, store, flags.lang.as_deref(), &flags.rest)?;
        }
        Some("check") => {
            expect_no_args(&flags.rest)?;
            return Ok(check(&catalog));
        }
        Some(other) => return Err(Error::Usage(format!("unknown command: {other}"))),
        None => {
            print!("{HELP}");
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn expect_no_args(rest: &[String]) -> Result<()> {
    match rest {
        [] => Ok(()),
        extra => Err(Error::Usage(format!("unexpected arguments: {}", extra.join(" ")))),
    }
}

fn list_locales(catalog: &Catalog, store: Box<dyn PreferenceStore>) {
    let session = Session::mount_restored(catalog, store);
    let system = Locale::system();

    for locale in Locale::ALL {
        let mut markers = Vec::new();
        if locale == Locale::default() {
            markers.push("default");
        }
        if locale == session.current_locale() {
            markers.push("active");
        }
        if Some(locale) == system {
            markers.push("system");
        }

        let suffix = if markers.is_empty() {
            String::new()
        } else {
            format!(" [{}]", markers.join(", "))
        };
        println!("{}\t{}{suffix}", locale, locale.native_name());
    }
}

fn translate(
    catalog: &Catalog,
    store: Box<dyn PreferenceStore>,
    lang: Option<&str>,
    keys: &[String],
) -> Result<()> {
    match lang {
        Some(tag) => {
            let locale = Locale::canonicalize(tag).map_err(|e| Error::Usage(e.to_string()))?;
            for key in keys {
                println!("{}", catalog.lookup(locale, key));
            }
        }
        None => {
            let session = Session::mount_restored(catalog, store);
            for key in keys {
                println!("{}", session.t(key));
            }
        }
    }
    Ok(())
}

fn check(catalog: &Catalog) -> ExitCode {
    let report = catalog.coverage();
    for coverage in &report.locales {
        println!(
            "{}: {:.1}% ({}/{})",
            coverage.locale,
            coverage.coverage_percent(),
            coverage.present,
            report.total_keys
        );
        for key in &coverage.missing {
            println!("  missing {key}");
        }
    }

    if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
