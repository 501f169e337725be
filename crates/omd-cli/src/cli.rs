use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const AFTER_HELP: &str = "\
The two input boxes must have identical geometries (the Hmat line), and no
solute atom may overlap a solvent atom. The output .omd file must be edited
before it can run in OpenMD.

Example:
   omdcombined -u solute.omd -v solvent.omd -o combined.omd";

#[derive(Parser, Debug)]
#[command(
    author = "The OpenMD Development Team",
    version,
    about = "Combines an OpenMD solute structure and a solvent structure sharing one periodic box into a single .omd snapshot file.",
    after_help = AFTER_HELP,
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Use the specified OpenMD (.omd) file as the solute.
    #[arg(short = 'u', long, required = true, value_name = "PATH")]
    pub solute: PathBuf,

    /// Use the specified OpenMD (.omd) file as the solvent.
    #[arg(short = 'v', long, required = true, value_name = "PATH")]
    pub solvent: PathBuf,

    /// Use the specified output (.omd) file.
    #[arg(short = 'o', long = "output-file", required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Increase verbosity level (--verbose for INFO, twice for DEBUG, three times for TRACE)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_mandatory_paths() {
        let cli = Cli::try_parse_from([
            "omdcombined",
            "-u",
            "solute.omd",
            "-v",
            "solvent.omd",
            "-o",
            "combined.omd",
        ])
        .unwrap();
        assert_eq!(cli.solute, PathBuf::from("solute.omd"));
        assert_eq!(cli.solvent, PathBuf::from("solvent.omd"));
        assert_eq!(cli.output, PathBuf::from("combined.omd"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn long_option_names_are_accepted() {
        let cli = Cli::try_parse_from([
            "omdcombined",
            "--solute",
            "a.omd",
            "--solvent",
            "b.omd",
            "--output-file",
            "c.omd",
            "--verbose",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn a_missing_mandatory_path_is_a_usage_error() {
        let result = Cli::try_parse_from(["omdcombined", "-u", "solute.omd", "-v", "solvent.omd"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from([
            "omdcombined",
            "-u",
            "a.omd",
            "-v",
            "b.omd",
            "-o",
            "c.omd",
            "--quiet",
            "--verbose",
        ]);
        assert!(result.is_err());
    }
}
