// src/cli.rs
use std::{error::Error, fs, path::PathBuf, time::Duration};

use crate::config::HarvestOptions;
use crate::model::HarvestOutput;
use crate::progress::LogProgress;
use crate::report::group_by_month;

pub const SECRET_ENV: &str = "PONTO_SENHA";
pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub identifier: String,
    pub secret: Option<String>,
    pub options: HarvestOptions,
    pub format: OutputFormat,
    pub out: Option<PathBuf>,
    pub help: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            identifier: s!(),
            secret: None,
            options: HarvestOptions::default(),
            format: OutputFormat::Json,
            out: None,
            help: false,
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Params, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "-u" | "--user" => params.identifier = args.next().ok_or("Missing value for --user")?,
            "-p" | "--password" => params.secret = Some(args.next().ok_or("Missing value for --password")?),
            "--base-url" => {
                let v = args.next().ok_or("Missing value for --base-url")?;
                url::Url::parse(&v).map_err(|e| format!("Invalid --base-url {v}: {e}"))?;
                params.options.set_base_url(&v);
            }
            "--timeout" => {
                let secs: u64 = args.next().ok_or("Missing value for --timeout")?.parse()?;
                if secs == 0 { return Err("--timeout must be at least 1 second".into()); }
                params.options.set_timeout(Duration::from_secs(secs));
            }
            "--goal" => {
                let goal: f64 = args.next().ok_or("Missing value for --goal")?.parse()?;
                if !(goal.is_finite() && goal > 0.0) { return Err(format!("Invalid goal: {goal}").into()); }
                params.options.weekly_goal_hours = goal;
            }
            "--max-pages" => {
                let n: usize = args.next().ok_or("Missing value for --max-pages")?.parse()?;
                if n == 0 { return Err("--max-pages must be at least 1".into()); }
                params.options.walk.max_pages = n;
            }
            "--dedupe-start-page" => params.options.walk.dedupe_start_page = true,
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "text" => OutputFormat::Text,
                    other => return Err(format!("Unknown format: {other}").into()),
                };
            }
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "-h" | "--help" => params.help = true,
            _ => return Err(format!("Unknown arg: {a}").into()),
        }
    }

    if !params.help && params.identifier.trim().is_empty() {
        return Err("Specify --user <id>".into());
    }
    Ok(params)
}

/// `--password` wins over the environment.
pub fn resolve_secret(params: &Params, env: Option<String>) -> Result<String, Box<dyn Error>> {
    params
        .secret
        .clone()
        .or(env)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("No password: pass --password or set {SECRET_ENV}").into())
}

pub async fn run(params: Params) -> Result<(), Box<dyn Error>> {
    if params.help {
        eprintln!("{HELP}");
        return Ok(());
    }

    let secret = resolve_secret(&params, std::env::var(SECRET_ENV).ok())?;
    let mut progress = LogProgress::new();

    let weeks = crate::harvest(&params.identifier, &secret, &params.options, Some(&mut progress)).await?;

    let rendered = match params.format {
        OutputFormat::Json => serde_json::to_string_pretty(&HarvestOutput { dados: weeks })?,
        OutputFormat::Text => group_by_month(&weeks)
            .iter()
            .map(|m| m.render())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    match &params.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            logf!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_full_command_line() {
        let p = parse_args(args(&[
            "-u", "0042", "--base-url", "http://localhost:3000", "--timeout", "5",
            "--goal", "40", "--max-pages", "12", "--dedupe-start-page", "--format", "TEXT", "-o", "out/w.txt",
        ]))
        .unwrap();
        assert_eq!(p.identifier, "0042");
        assert_eq!(p.options.walk.start_url, "http://localhost:3000/core/Ponto/Consulta");
        assert_eq!(p.options.login_timeout, Duration::from_secs(5));
        assert_eq!(p.options.weekly_goal_hours, 40.0);
        assert_eq!(p.options.walk.max_pages, 12);
        assert!(p.options.walk.dedupe_start_page);
        assert_eq!(p.format, OutputFormat::Text);
        assert_eq!(p.out, Some(PathBuf::from("out/w.txt")));
    }

    #[test]
    fn user_is_required_unless_help() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--help"])).unwrap().help);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(args(&["-u", "1", "--format", "csv"])).is_err());
        assert!(parse_args(args(&["-u", "1", "--goal", "-3"])).is_err());
        assert!(parse_args(args(&["-u", "1", "--base-url", "not a url"])).is_err());
        assert!(parse_args(args(&["-u", "1", "--wat"])).is_err());
        assert!(parse_args(args(&["-u"])).is_err());
    }

    #[test]
    fn password_flag_beats_env() {
        let mut p = parse_args(args(&["-u", "1"])).unwrap();
        assert_eq!(resolve_secret(&p, Some(s!("env"))).unwrap(), "env");
        assert!(resolve_secret(&p, None).is_err());
        p.secret = Some(s!("flag"));
        assert_eq!(resolve_secret(&p, Some(s!("env"))).unwrap(), "flag");
    }
}
