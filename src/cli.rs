use crate::error::Error;
use crate::filter::FilterSpec;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use std::{io, thread};

const FILTERS_HELP: &str = "Filters applied in the given order:
  -crop <width> <height>   keep the top-left region
  -gs                      grayscale
  -neg                     negative
  -sharp                   sharpen
  -edge <threshold>        edge detection, threshold in [0, 1]
  -blur <sigma>            gaussian blur
  -gamma <value>           gamma correction
  -med <radius>            median filter
  -hist_eq                 histogram equalization";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    /// Parses the command line. Malformed options terminate the process with
    /// clap's usage message; a malformed filter chain is returned as error.
    pub fn parse<I, T>(&mut self, itr: I) -> crate::Result<Arguments>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    pub fn render_help(&mut self) -> String {
        self.command.render_help().to_string()
    }

    /// The message printed for any failed run: the error followed by the usage help.
    pub fn render_failure(&mut self, error: &Error) -> String {
        format!("Error: {}\n\n{}", error, self.render_help())
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_threads_argument(command);
        Self::register_filters_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_filters_argument(command: Command) -> Command {
        command.arg(Self::create_filters_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .after_help(FILTERS_HELP)
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to 24-bit BMP input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to BMP output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of threads for row-parallel filters")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_filters_argument() -> Arg {
        Arg::new("filters")
            .help("Filter chain, see below")
            .value_name("FILTER")
            .value_parser(value_parser!(String))
            .num_args(1..)
            .action(ArgAction::Append)
            .allow_hyphen_values(true)
            .trailing_var_arg(true)
            .required(false)
    }

    fn extract_arguments(matches: &ArgMatches) -> crate::Result<Arguments> {
        Ok(Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            filters: Self::extract_filters_argument(matches)?,
        })
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_filters_argument(matches: &ArgMatches) -> crate::Result<Vec<FilterSpec>> {
        let tokens: Vec<&str> = matches
            .get_many::<String>("filters")
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default();
        FilterChainParser::new(&tokens).parse()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns the trailing command line tokens into filter descriptions, each
/// filter name consuming the arguments it needs.
struct FilterChainParser<'a, 'b> {
    tokens: std::slice::Iter<'a, &'b str>,
}

impl<'a, 'b> FilterChainParser<'a, 'b> {
    fn new(tokens: &'a [&'b str]) -> Self {
        FilterChainParser {
            tokens: tokens.iter(),
        }
    }

    fn parse(mut self) -> crate::Result<Vec<FilterSpec>> {
        let mut filters = vec![];
        while let Some(&token) = self.tokens.next() {
            filters.push(self.parse_filter(token)?);
        }
        Ok(filters)
    }

    fn parse_filter(&mut self, token: &str) -> crate::Result<FilterSpec> {
        let filter = match token {
            "-crop" => FilterSpec::Crop {
                width: self.parse_argument("-crop", "width")?,
                height: self.parse_argument("-crop", "height")?,
            },
            "-gs" => FilterSpec::Grayscale,
            "-neg" => FilterSpec::Negative,
            "-sharp" => FilterSpec::Sharpen,
            "-edge" => FilterSpec::EdgeDetect {
                threshold: self.parse_argument("-edge", "threshold")?,
            },
            "-blur" => FilterSpec::GaussianBlur {
                sigma: self.parse_argument("-blur", "sigma")?,
            },
            "-gamma" => FilterSpec::Gamma {
                value: self.parse_argument("-gamma", "value")?,
            },
            "-med" => FilterSpec::Median {
                radius: self.parse_argument("-med", "radius")?,
            },
            "-hist_eq" => FilterSpec::HistogramEqualize,
            unknown => return Err(Error::UnknownFilter(unknown.to_owned())),
        };
        Ok(filter)
    }

    fn parse_argument<T: FromStr>(
        &mut self,
        filter: &'static str,
        argument: &'static str,
    ) -> crate::Result<T> {
        let token = self
            .tokens
            .next()
            .ok_or(Error::MissingFilterArgument(filter, argument))?;
        token
            .parse::<T>()
            .map_err(|_| Error::InvalidFilterArgument(filter, argument, token.to_string()))
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::{CLIParser, FilterChainParser};
    use crate::error::{Error, ErrorKind};
    use crate::filter::FilterSpec;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    fn parse_chain(tokens: &[&str]) -> crate::Result<Vec<FilterSpec>> {
        FilterChainParser::new(tokens).parse()
    }

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "testfile.bmp";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "testfile.bmp";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_number_of_threads_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--threads", "5"]);
        let actual = CLIParser::extract_threads_argument(&matches);
        assert_eq!(actual, 5);
    }

    #[test]
    fn parse_filter_chain_in_order() {
        let filters = parse_chain(&[
            "-crop", "20", "10", "-gs", "-neg", "-sharp", "-edge", "0.1", "-blur", "1.5",
            "-gamma", "2.2", "-med", "2", "-hist_eq",
        ])
        .unwrap();
        assert_eq!(
            filters,
            vec![
                FilterSpec::Crop {
                    width: 20,
                    height: 10
                },
                FilterSpec::Grayscale,
                FilterSpec::Negative,
                FilterSpec::Sharpen,
                FilterSpec::EdgeDetect { threshold: 0.1 },
                FilterSpec::GaussianBlur { sigma: 1.5 },
                FilterSpec::Gamma { value: 2.2 },
                FilterSpec::Median { radius: 2 },
                FilterSpec::HistogramEqualize,
            ]
        );
    }

    #[test]
    fn negative_numbers_are_kept_for_validation() {
        let filters = parse_chain(&["-crop", "-1", "5"]).unwrap();
        assert_eq!(
            filters,
            vec![FilterSpec::Crop {
                width: -1,
                height: 5
            }]
        );
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let error = parse_chain(&["-gs", "-sepia"]).unwrap_err();
        assert!(matches!(error, Error::UnknownFilter(ref name) if name == "-sepia"));
        assert_eq!(error.kind(), ErrorKind::Usage);
    }

    #[test]
    fn missing_filter_argument_is_rejected() {
        let error = parse_chain(&["-crop", "10"]).unwrap_err();
        assert!(matches!(error, Error::MissingFilterArgument("-crop", "height")));
    }

    #[test]
    fn unparsable_filter_argument_is_rejected() {
        let error = parse_chain(&["-blur", "wide"]).unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidFilterArgument("-blur", "sigma", ref token) if token == "wide"
        ));
        let error = parse_chain(&["-med", "1.5"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Usage);
    }

    #[test]
    fn parse_required_arguments_only() {
        let input_file_name = "inputfile.bmp";
        let input_file_path = format!("/input_directory/{}", input_file_name);
        let output_file_name = "outputfile.bmp";
        let output_file_path = format!("/output_directory/{}", output_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser
            .parse(vec![
                PROGRAM_NAME_ARGUMENT,
                &input_file_path,
                &output_file_path,
                "-t",
                "8",
            ])
            .unwrap();
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            input_file_name,
            "input file does not match"
        );
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            output_file_name,
            "output file does not match"
        );
        assert!(arguments.filters.is_empty(), "no filters expected");
        assert_eq!(
            arguments.number_of_threads, 8,
            "number_of_threads does not match"
        );
    }

    #[test]
    fn parse_files_followed_by_filters() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser
            .parse(vec![
                PROGRAM_NAME_ARGUMENT,
                "--threads",
                "2",
                "in.bmp",
                "out.bmp",
                "-gs",
                "-hist_eq",
                "-gamma",
                "0.5",
            ])
            .unwrap();
        assert_eq!(arguments.number_of_threads, 2);
        assert_eq!(
            arguments.filters,
            vec![
                FilterSpec::Grayscale,
                FilterSpec::HistogramEqualize,
                FilterSpec::Gamma { value: 0.5 },
            ]
        );
    }

    #[test]
    fn failure_message_carries_usage_help() {
        let mut cli_parser = CLIParser::default();
        let message = cli_parser.render_failure(&Error::TruncatedFile("pixel data"));
        assert!(message.starts_with("Error: Unexpected end of file while reading pixel data"));
        assert!(message.contains("Usage:"), "usage help missing: {}", message);
        assert!(message.contains("-hist_eq"), "filter list missing: {}", message);
    }

    #[test]
    fn unknown_filter_on_command_line_is_an_error() {
        let mut cli_parser = CLIParser::default();
        let result = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, "in.bmp", "out.bmp", "-foo"]);
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::Usage));
    }
}
