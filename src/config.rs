// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line options and their resolution into a runtime [`Config`].

use std::path::PathBuf;
use std::time::Duration;

use crate::model::{NodeLabel, PinLabel, StreamLabel};
use crate::selection::SelectionAction;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:1212";
pub const BACKEND_URL_ENV: &str = "MGNAV_BACKEND_URL";

pub fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<backend-url>] [options]\n  {program} [--backend <url>] [options]\n  {program} --demo [options]\n\nOptions:\n  --refresh-ms <n>    re-fetch the properties every n milliseconds\n  --timeout-ms <n>    per-request timeout\n  --jsonp             request JSONP replies (callback query parameter)\n  --log-file <path>   write tracing output to <path> (filter via MGNAV_LOG)\n  --snapshot          print the HTML view once and exit\n  --node <name>       start with <name> selected\n  --pin <name>        start with input pin <name> of --node selected\n  --stream <name>     start with output stream <name> of --node selected\n\nThe backend url defaults to ${BACKEND_URL_ENV} or {DEFAULT_BACKEND_URL}.\n--demo serves a built-in demo graph on an ephemeral port and cannot be combined with a backend url."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub backend: Option<String>,
    pub demo: bool,
    pub refresh_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub jsonp: bool,
    pub log_file: Option<PathBuf>,
    pub snapshot: bool,
    pub node: Option<NodeLabel>,
    pub pin: Option<PinLabel>,
    pub stream: Option<StreamLabel>,
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn parse_millis(raw: Option<String>) -> Result<u64, ()> {
    let millis: u64 = raw.ok_or(())?.parse().map_err(|_| ())?;
    if millis == 0 {
        return Err(());
    }
    Ok(millis)
}

fn parse_backend(raw: String) -> Result<String, ()> {
    if raw.trim().is_empty() {
        return Err(());
    }
    Ok(raw)
}

pub fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => set_flag(&mut options.demo)?,
            "--jsonp" => set_flag(&mut options.jsonp)?,
            "--snapshot" => set_flag(&mut options.snapshot)?,
            "--backend" => {
                let url = parse_backend(args.next().ok_or(())?)?;
                set_once(&mut options.backend, url)?;
            }
            "--refresh-ms" => set_once(&mut options.refresh_ms, parse_millis(args.next())?)?,
            "--timeout-ms" => set_once(&mut options.timeout_ms, parse_millis(args.next())?)?,
            "--log-file" => {
                let path = args.next().ok_or(())?;
                set_once(&mut options.log_file, PathBuf::from(path))?;
            }
            "--node" => {
                let label = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.node, label)?;
            }
            "--pin" => {
                let label = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.pin, label)?;
            }
            "--stream" => {
                let label = args.next().ok_or(())?.parse().map_err(|_| ())?;
                set_once(&mut options.stream, label)?;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.backend, parse_backend(arg)?)?,
        }
    }

    if options.demo && options.backend.is_some() {
        return Err(());
    }

    if options.pin.is_some() && options.stream.is_some() {
        return Err(());
    }

    if options.node.is_none() && (options.pin.is_some() || options.stream.is_some()) {
        return Err(());
    }

    Ok(options)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend url `{0}` must start with http:// or https://")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendTarget {
    Url(String),
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: BackendTarget,
    pub refresh: Option<Duration>,
    pub timeout: Option<Duration>,
    pub jsonp: bool,
    pub log_file: Option<PathBuf>,
    pub snapshot: bool,
    initial: Vec<SelectionAction>,
}

impl Config {
    /// Resolves parsed options against the environment (`env_backend` is the value of
    /// [`BACKEND_URL_ENV`], if set). Flags win over the environment.
    pub fn resolve(options: CliOptions, env_backend: Option<String>) -> Result<Self, ConfigError> {
        let backend = if options.demo {
            BackendTarget::Demo
        } else {
            let url = options
                .backend
                .or_else(|| env_backend.filter(|url| !url.trim().is_empty()))
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
            BackendTarget::Url(normalize_url(url)?)
        };

        let mut initial = Vec::new();
        if let Some(node) = options.node {
            initial.push(SelectionAction::ToggleNode(node));
        }
        if let Some(pin) = options.pin {
            initial.push(SelectionAction::SelectPin(pin));
        }
        if let Some(stream) = options.stream {
            initial.push(SelectionAction::SelectStream(stream));
        }

        Ok(Self {
            backend,
            refresh: options.refresh_ms.map(Duration::from_millis),
            timeout: options.timeout_ms.map(Duration::from_millis),
            jsonp: options.jsonp,
            log_file: options.log_file,
            snapshot: options.snapshot,
            initial,
        })
    }

    /// Selection actions to replay through the reducer before the first fetch.
    pub fn initial_actions(&self) -> &[SelectionAction] {
        &self.initial
    }
}

fn normalize_url(url: String) -> Result<String, ConfigError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::UnsupportedScheme(url.to_owned()));
    }
    Ok(url.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{parse_options, BackendTarget, CliOptions, Config, ConfigError, DEFAULT_BACKEND_URL};
    use crate::selection::SelectionAction;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_positional_backend() {
        let options = parse_options(args(&["http://media:1212"])).expect("parse options");
        assert_eq!(options.backend.as_deref(), Some("http://media:1212"));
        assert!(!options.demo);
    }

    #[test]
    fn parses_backend_flag() {
        let options =
            parse_options(args(&["--backend", "http://media:1212"])).expect("parse options");
        assert_eq!(options.backend.as_deref(), Some("http://media:1212"));
    }

    #[test]
    fn parses_timing_flags() {
        let options = parse_options(args(&["--refresh-ms", "500", "--timeout-ms", "2000"]))
            .expect("parse options");
        assert_eq!(options.refresh_ms, Some(500));
        assert_eq!(options.timeout_ms, Some(2000));
    }

    #[test]
    fn parses_initial_selection() {
        let options =
            parse_options(args(&["--node", "producer", "--stream", "out"])).expect("parse options");
        assert_eq!(options.node.as_ref().map(|n| n.as_str()), Some("producer"));
        assert_eq!(options.stream.as_ref().map(|s| s.as_str()), Some("out"));
        assert!(options.pin.is_none());
    }

    #[test]
    fn parses_flags_in_any_order() {
        let options = parse_options(args(&["--jsonp", "--demo", "--snapshot"])).expect("parse");
        assert!(options.jsonp && options.demo && options.snapshot);

        let options = parse_options(args(&["--snapshot", "--jsonp", "--demo"])).expect("parse");
        assert!(options.jsonp && options.demo && options.snapshot);
    }

    #[test]
    fn rejects_demo_with_backend() {
        parse_options(args(&["--demo", "http://media:1212"])).unwrap_err();
        parse_options(args(&["--backend", "http://media:1212", "--demo"])).unwrap_err();
    }

    #[test]
    fn rejects_pin_with_stream() {
        parse_options(args(&["--node", "n", "--pin", "p", "--stream", "s"])).unwrap_err();
    }

    #[test]
    fn rejects_pin_or_stream_without_node() {
        parse_options(args(&["--pin", "p"])).unwrap_err();
        parse_options(args(&["--stream", "s"])).unwrap_err();
    }

    #[test]
    fn rejects_invalid_labels() {
        parse_options(args(&["--node", ""])).unwrap_err();
        parse_options(args(&["--node", "a/b"])).unwrap_err();
    }

    #[test]
    fn rejects_empty_backend() {
        parse_options(args(&[""])).unwrap_err();
        parse_options(args(&["--backend", "  "])).unwrap_err();
    }

    #[test]
    fn rejects_zero_or_garbage_millis() {
        parse_options(args(&["--refresh-ms", "0"])).unwrap_err();
        parse_options(args(&["--timeout-ms", "soon"])).unwrap_err();
        parse_options(args(&["--timeout-ms"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(args(&["--nope"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--demo", "--demo"])).unwrap_err();
        parse_options(args(&["--jsonp", "--jsonp"])).unwrap_err();
        parse_options(args(&["one", "two"])).unwrap_err();
        parse_options(args(&["--backend", "http://a", "http://b"])).unwrap_err();
        parse_options(args(&["--node", "a", "--node", "b"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse_options(args(&["--backend"])).unwrap_err();
        parse_options(args(&["--log-file"])).unwrap_err();
        parse_options(args(&["--node"])).unwrap_err();
    }

    #[test]
    fn resolve_prefers_flag_then_env_then_default() {
        let flagged = CliOptions {
            backend: Some("http://flag:1/".to_owned()),
            ..CliOptions::default()
        };
        let config = Config::resolve(flagged, Some("http://env:2".to_owned())).expect("resolve");
        assert_eq!(config.backend, BackendTarget::Url("http://flag:1".to_owned()));

        let config = Config::resolve(CliOptions::default(), Some("http://env:2//".to_owned()))
            .expect("resolve");
        assert_eq!(config.backend, BackendTarget::Url("http://env:2".to_owned()));

        let config =
            Config::resolve(CliOptions::default(), Some(String::new())).expect("resolve");
        assert_eq!(config.backend, BackendTarget::Url(DEFAULT_BACKEND_URL.to_owned()));
    }

    #[test]
    fn resolve_rejects_non_http_urls() {
        let options = CliOptions {
            backend: Some("ftp://media".to_owned()),
            ..CliOptions::default()
        };
        assert_eq!(
            Config::resolve(options, None),
            Err(ConfigError::UnsupportedScheme("ftp://media".to_owned()))
        );
    }

    #[test]
    fn resolve_demo_ignores_env_backend() {
        let options = CliOptions {
            demo: true,
            ..CliOptions::default()
        };
        let config = Config::resolve(options, Some("not a url".to_owned())).expect("resolve");
        assert_eq!(config.backend, BackendTarget::Demo);
    }

    #[test]
    fn resolve_builds_initial_actions_and_durations() {
        let options = parse_options(args(&["--node", "n", "--pin", "p", "--refresh-ms", "250"]))
            .expect("parse options");
        let config = Config::resolve(options, None).expect("resolve");

        assert_eq!(config.refresh, Some(Duration::from_millis(250)));
        assert_eq!(config.timeout, None);
        assert!(matches!(
            config.initial_actions(),
            [SelectionAction::ToggleNode(n), SelectionAction::SelectPin(p)]
                if n.as_str() == "n" && p.as_str() == "p"
        ));
    }
}
