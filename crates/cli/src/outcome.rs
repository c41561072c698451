use optschema::ParseResult;

/// Exit status for parses that found usage errors.
pub const USAGE_ERROR_STATUS: u8 = 2;

/// What the shell does with a finished parse.
///
/// `--help` and `--version` win over usage errors, so `tool --help --bogus`
/// still prints help and exits successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Help,
    Version,
    Failed(Vec<String>),
    Matched,
}

impl Outcome {
    pub fn from_result(result: &ParseResult) -> Self {
        if result.help {
            Self::Help
        } else if result.version {
            Self::Version
        } else if !result.is_ok() {
            Self::Failed(result.messages())
        } else {
            Self::Matched
        }
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Failed(_) => USAGE_ERROR_STATUS,
            Self::Help | Self::Version | Self::Matched => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optschema::{Definition, OptionDef, Parser};

    fn parser() -> Parser {
        Parser::new(
            Definition::new()
                .version("1.0.0")
                .option("name", OptionDef::string().required()),
        )
        .unwrap()
    }

    #[test]
    fn help_wins_over_errors() {
        let outcome = Outcome::from_result(&parser().parse_args(["--help", "--bogus"]));
        assert_eq!(outcome, Outcome::Help);
        assert_eq!(outcome.exit_status(), 0);
    }

    #[test]
    fn version_exits_successfully() {
        let outcome = Outcome::from_result(&parser().parse_args(["-v"]));
        assert_eq!(outcome, Outcome::Version);
        assert_eq!(outcome.exit_status(), 0);
    }

    #[test]
    fn errors_fail_with_all_messages() {
        let outcome = Outcome::from_result(&parser().parse_args(["--bogus"]));
        assert_eq!(
            outcome,
            Outcome::Failed(vec![
                "Unrecognized argument: --bogus".to_string(),
                "Missing required option: --name".to_string(),
            ])
        );
        assert_eq!(outcome.exit_status(), USAGE_ERROR_STATUS);
    }

    #[test]
    fn clean_parse_matches() {
        let outcome = Outcome::from_result(&parser().parse_args(["-n", "ferris"]));
        assert_eq!(outcome, Outcome::Matched);
        assert_eq!(outcome.exit_status(), 0);
    }
}
