mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{app_dir, Config};
use crate::services::aggregator::{HOUR_BOUNDS, MONTH_BOUNDS};
use crate::services::{
    evaluate, Aggregator, DashboardQuery, DataLoaderService, Question, RangeSelection,
    UserTypeFilter,
};
use crate::telemetry::{init_tracing, LogTarget};
use crate::types::{Dataset, Language, Season};

/// Interactive dashboard for the bike-sharing rental dataset
#[derive(Parser)]
#[command(name = "bikedash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    data: DataArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct DataArgs {
    /// Directory holding hour.csv and day.csv
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Path to the hourly table (overrides --data-dir)
    #[arg(long, global = true, value_name = "FILE")]
    hourly: Option<PathBuf>,

    /// Path to the daily table (overrides --data-dir)
    #[arg(long, global = true, value_name = "FILE")]
    daily: Option<PathBuf>,
}

impl DataArgs {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(path) = &self.hourly {
            config.hourly_path = path.clone();
        }
        if let Some(path) = &self.daily {
            config.daily_path = path.clone();
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    #[command(flatten)]
    Report(ReportCommand),
}

/// Subcommands that print a report and exit
#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Mean rentals per hour, working days vs weekends
    Hourly {
        /// First hour of the window (0-23)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        from: i32,

        /// Last hour of the window (0-23)
        #[arg(long, default_value_t = 23, allow_negative_numbers = true)]
        to: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mean daily rentals per weather condition within a season
    Seasons {
        /// Season to show (all seasons when omitted)
        #[arg(long, value_enum)]
        season: Option<Season>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Casual vs registered riders by day type and month
    Users {
        #[arg(long, value_enum, default_value_t = UserTypeFilter::Both)]
        user_type: UserTypeFilter,

        /// First month of the trend window (1-12)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        from_month: i32,

        /// Last month of the trend window (1-12)
        #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
        to_month: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dataset row counts and rental totals
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = self.data.apply(Config::load()?);

        match self.command {
            None | Some(Commands::Tui) => {
                if let Some(dir) = app_dir() {
                    init_tracing(self.verbose, LogTarget::File(dir.join("logs")));
                }
                crate::tui::run(config)
            }
            Some(Commands::Report(command)) => {
                init_tracing(self.verbose, LogTarget::Stderr);
                let dataset = DataLoaderService::from_config(&config).load()?;
                let output = command.render(&dataset, config.language)?;
                println!("{}", output);
                Ok(())
            }
        }
    }
}

impl ReportCommand {
    /// Produce the report text (or JSON) for a loaded dataset
    fn render(&self, dataset: &Dataset, language: Language) -> anyhow::Result<String> {
        match *self {
            Self::Hourly { from, to, json } => {
                let query = DashboardQuery {
                    hours: RangeSelection::clamped(from, to, HOUR_BOUNDS),
                    ..DashboardQuery::for_question(Question::HourlyPattern)
                };
                let view = evaluate(dataset, &query)?;
                if json {
                    return Ok(serde_json::to_string_pretty(&view)?);
                }
                Ok(report::render_view(&view, language))
            }
            Self::Seasons { season, json } => {
                let seasons: Vec<Season> = match season {
                    Some(season) => vec![season],
                    None => Season::all().to_vec(),
                };
                let views = seasons
                    .into_iter()
                    .map(|season| {
                        let query = DashboardQuery {
                            season,
                            ..DashboardQuery::for_question(Question::SeasonWeatherPattern)
                        };
                        evaluate(dataset, &query)
                    })
                    .collect::<crate::types::Result<Vec<_>>>()?;

                if json {
                    return Ok(serde_json::to_string_pretty(&views)?);
                }
                Ok(views
                    .iter()
                    .map(|view| report::render_view(view, language))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Self::Users {
                user_type,
                from_month,
                to_month,
                json,
            } => {
                let query = DashboardQuery {
                    user_type,
                    months: RangeSelection::clamped(from_month, to_month, MONTH_BOUNDS),
                    ..DashboardQuery::for_question(Question::UserTypeComparison)
                };
                let view = evaluate(dataset, &query)?;
                if json {
                    return Ok(serde_json::to_string_pretty(&view)?);
                }
                Ok(report::render_view(&view, language))
            }
            Self::Summary { json } => {
                let summary = Aggregator::summary(dataset);
                if json {
                    return Ok(serde_json::to_string_pretty(&summary)?);
                }
                Ok(report::render_summary(&summary))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixture_dataset() -> Dataset {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        DataLoaderService::new(fixtures.join("hour.csv"), fixtures.join("day.csv"))
            .load()
            .unwrap()
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["bikedash"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_hourly_defaults() {
        let cli = Cli::try_parse_from(["bikedash", "hourly"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportCommand::Hourly {
                from: 0,
                to: 23,
                json: false
            }))
        ));
    }

    #[test]
    fn test_cli_parse_out_of_range_values() {
        let cli =
            Cli::try_parse_from(["bikedash", "hourly", "--from", "-1", "--to", "300"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportCommand::Hourly {
                from: -1,
                to: 300,
                ..
            }))
        ));

        let cli = Cli::try_parse_from(["bikedash", "users", "--from-month", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportCommand::Users {
                from_month: -1,
                to_month: 12,
                ..
            }))
        ));
    }

    #[test]
    fn test_cli_parse_tui() {
        let cli = Cli::try_parse_from(["bikedash", "tui"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }

    #[test]
    fn test_cli_parse_users() {
        let cli = Cli::try_parse_from([
            "bikedash",
            "users",
            "--user-type",
            "casual",
            "--from-month",
            "4",
            "--to-month",
            "6",
            "--json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportCommand::Users {
                user_type: UserTypeFilter::Casual,
                from_month: 4,
                to_month: 6,
                json: true
            }))
        ));
    }

    #[test]
    fn test_cli_parse_season_name() {
        let cli = Cli::try_parse_from(["bikedash", "seasons", "--season", "winter"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Report(ReportCommand::Seasons {
                season: Some(Season::Winter),
                json: false
            }))
        ));
        let unknown = Cli::try_parse_from(["bikedash", "seasons", "--season", "monsoon"]);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_global_data_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bikedash",
            "summary",
            "--data-dir",
            "/srv/bikes",
            "--daily",
            "/tmp/other.csv",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);

        let config = cli.data.apply(Config::default());
        assert_eq!(config.hourly_path, PathBuf::from("/srv/bikes/hour.csv"));
        assert_eq!(config.daily_path, PathBuf::from("/tmp/other.csv"));
    }

    #[test]
    fn test_render_hourly_clamps_reversed_range() {
        let command = ReportCommand::Hourly {
            from: 8,
            to: 0,
            json: true,
        };
        let json = command.render(&fixture_dataset(), Language::En).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["question"], "hourly_pattern");
        assert_eq!(value["hours"]["lo"], 0);
        assert_eq!(value["hours"]["hi"], 8);
        assert_eq!(value["working_day"]["8"], 100.0);
        assert!(value["working_day"].get("17").is_none());
    }

    #[test]
    fn test_render_clamps_out_of_range_values() {
        let command = ReportCommand::Hourly {
            from: -1,
            to: 300,
            json: true,
        };
        let json = command.render(&fixture_dataset(), Language::En).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hours"]["lo"], 0);
        assert_eq!(value["hours"]["hi"], 23);

        let command = ReportCommand::Users {
            user_type: UserTypeFilter::Registered,
            from_month: -1,
            to_month: 40,
            json: true,
        };
        let json = command.render(&fixture_dataset(), Language::En).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["months"]["lo"], 1);
        assert_eq!(value["months"]["hi"], 12);
    }

    #[test]
    fn test_render_all_seasons() {
        let command = ReportCommand::Seasons {
            season: None,
            json: false,
        };
        let text = command.render(&fixture_dataset(), Language::En).unwrap();
        for season in ["Spring", "Summer", "Fall", "Winter"] {
            assert!(text.contains(&format!("Season: {}", season)));
        }
        assert!(text.contains("4,000.0"));
    }

    #[test]
    fn test_render_users_json() {
        let command = ReportCommand::Users {
            user_type: UserTypeFilter::Both,
            from_month: 4,
            to_month: 5,
            json: true,
        };
        let json = command.render(&fixture_dataset(), Language::En).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["question"], "user_type_comparison");
        assert_eq!(value["trend"].as_array().unwrap().len(), 3);
        assert_eq!(value["totals"][0]["casual_total"], 970);
    }

    #[test]
    fn test_render_summary() {
        let command = ReportCommand::Summary { json: true };
        let json = command.render(&fixture_dataset(), Language::En).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hourly_rows"], 7);
        assert_eq!(value["daily_rows"], 8);
        assert_eq!(value["rental_total"], 16635);
    }
}
