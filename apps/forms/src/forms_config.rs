use std::env;

use clap::Parser;
use folio_core::{AppError, AppResult};

/// Which of the site's forms to drive.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Contact page: name, email address and message
    Contact,
    /// Guestbook page: a single entry
    Guestbook,
}

/// Fill in and submit one of the site's forms from the terminal
#[derive(Parser, Debug)]
#[command(name = "folio-forms")]
#[command(version, about, long_about = None)]
pub struct FormsArgs {
    /// Form to fill in
    #[arg(value_enum, default_value = "contact")]
    pub form: FormKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDispatchConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatcherConfig {
    Console { reply: Option<String> },
    Http(HttpDispatchConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormsConfig {
    pub form: FormKind,
    pub dispatcher: DispatcherConfig,
}

impl FormsConfig {
    /// Parses the command line and reads dispatcher settings from the environment.
    pub fn load() -> AppResult<Self> {
        let args = FormsArgs::parse();
        Self::from_source(args.form, |name| env::var(name).ok())
    }

    fn from_source(form: FormKind, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let dispatcher = match lookup("FORMS_DISPATCHER")
            .unwrap_or_else(|| "console".to_owned())
            .as_str()
        {
            "console" => DispatcherConfig::Console {
                reply: lookup("FORMS_CONSOLE_REPLY")
                    .map(|value| value.trim().to_owned())
                    .filter(|value| !value.is_empty()),
            },
            "http" => {
                let base_url = lookup("FORMS_API_BASE_URL")
                    .map(|value| value.trim().trim_end_matches('/').to_owned())
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "FORMS_API_BASE_URL is required when FORMS_DISPATCHER is 'http'"
                                .to_owned(),
                        )
                    })?;
                let timeout_ms = match lookup("FORMS_DISPATCH_TIMEOUT_MS") {
                    Some(value) => value.parse::<u64>().map_err(|error| {
                        AppError::Validation(format!(
                            "invalid FORMS_DISPATCH_TIMEOUT_MS value '{value}': {error}"
                        ))
                    })?,
                    None => 15_000,
                };
                if timeout_ms == 0 {
                    return Err(AppError::Validation(
                        "FORMS_DISPATCH_TIMEOUT_MS must be greater than zero".to_owned(),
                    ));
                }

                DispatcherConfig::Http(HttpDispatchConfig {
                    base_url,
                    timeout_ms,
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "FORMS_DISPATCHER must be either 'console' or 'http', got '{other}'"
                )));
            }
        };

        Ok(Self { form, dispatcher })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;

    use super::{DispatcherConfig, FormKind, FormsArgs, FormsConfig, HttpDispatchConfig};

    fn load(form: FormKind, vars: &[(&str, &str)]) -> Result<FormsConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        FormsConfig::from_source(form, |name| vars.get(name).cloned())
            .map_err(|error| error.to_string())
    }

    #[test]
    fn defaults_to_console_dispatcher() {
        assert_eq!(
            load(FormKind::Guestbook, &[]),
            Ok(FormsConfig {
                form: FormKind::Guestbook,
                dispatcher: DispatcherConfig::Console { reply: None },
            })
        );
    }

    #[test]
    fn http_dispatcher_requires_base_url_and_trims_slash() {
        assert!(load(FormKind::Contact, &[("FORMS_DISPATCHER", "http")]).is_err());

        let config = load(
            FormKind::Contact,
            &[
                ("FORMS_DISPATCHER", "http"),
                ("FORMS_API_BASE_URL", "https://example.dev/"),
            ],
        );
        assert_eq!(
            config.map(|config| config.dispatcher),
            Ok(DispatcherConfig::Http(HttpDispatchConfig {
                base_url: "https://example.dev".to_owned(),
                timeout_ms: 15_000,
            }))
        );
    }

    #[test]
    fn rejects_zero_timeout_and_unknown_values() {
        assert!(
            load(
                FormKind::Contact,
                &[
                    ("FORMS_DISPATCHER", "http"),
                    ("FORMS_API_BASE_URL", "https://example.dev"),
                    ("FORMS_DISPATCH_TIMEOUT_MS", "0"),
                ],
            )
            .is_err()
        );
        assert!(load(FormKind::Contact, &[("FORMS_DISPATCHER", "smtp")]).is_err());
    }

    #[test]
    fn form_argument_defaults_to_contact() {
        let defaulted = FormsArgs::try_parse_from(["folio-forms"]).map(|args| args.form);
        let guestbook =
            FormsArgs::try_parse_from(["folio-forms", "guestbook"]).map(|args| args.form);

        assert_eq!(defaulted.ok(), Some(FormKind::Contact));
        assert_eq!(guestbook.ok(), Some(FormKind::Guestbook));
        assert!(FormsArgs::try_parse_from(["folio-forms", "newsletter"]).is_err());
    }
}
