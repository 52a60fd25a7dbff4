use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use locale_redirect::config::{load_config, ConfigError, GatewayConfig, Settings};
use locale_redirect::http::request::classify;
use locale_redirect::redirect::{evaluate, LanguageCookie};
use locale_redirect::{RequestContext, SiteDirectory, StaticSiteDirectory};

#[derive(Parser)]
#[command(name = "redirect-cli")]
#[command(about = "Inspect language redirect configuration and decisions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check {
        config: PathBuf,
    },
    /// Show the site and decision for a request URL
    Explain {
        config: PathBuf,

        /// Absolute request URL
        url: String,

        /// Value of the language cookie
        #[arg(long)]
        cookie: Option<String>,

        /// Accept-Language header
        #[arg(long)]
        accept_language: Option<String>,

        #[arg(long, default_value = "GET")]
        method: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { config } => check(&config),
        Commands::Explain {
            config,
            url,
            cookie,
            accept_language,
            method,
        } => load_config(&config)
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|config| explain(&config, &url, cookie, accept_language, &method)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match load_config(path) {
        Ok(config) => {
            let settings = Settings::from(&config.redirect);
            let summary = json!({
                "valid": true,
                "sites": config.sites.len(),
                "enabled": settings.enabled,
                "cookie_name": settings.cookie_name,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(ConfigError::Validation(errors)) => {
            for error in &errors {
                eprintln!("  - {}", error);
            }
            Err(format!("{} validation error(s)", errors.len()).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn explain(
    config: &GatewayConfig,
    url: &str,
    cookie: Option<String>,
    accept_language: Option<String>,
    method: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from(&config.redirect);
    let directory =
        StaticSiteDirectory::new(config.sites.clone()).with_default_site(config.default_site);

    let parsed = url::Url::parse(url)?;
    let host_info = parsed.origin().ascii_serialization();
    let ambient = directory
        .ambient_site(&host_info, url)
        .cloned()
        .ok_or("configuration has no sites")?;

    let mut request = RequestContext::from_url(url, ambient.clone())
        .ok_or("URL has no host")?
        .with_method(method)
        .with_language_cookie(cookie)
        .with_accept_language(accept_language)
        .with_kind(classify(parsed.path(), parsed.query(), &config.request));

    let decision = evaluate(&settings, &directory, &mut request);
    let set_cookie = decision.cookie_language().map(|language| {
        LanguageCookie::new(&settings.cookie_name, language, request.is_secure()).header_value()
    });

    let report = json!({
        "ambient_site": ambient,
        "current_site": request.current_site(),
        "decision": decision,
        "set_cookie": set_cookie,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
