use clap::Parser;
use propwire::{Bounds, DEFAULT_CUTOFF_HZ, EqPipelineConfig, SliderRange};

use crate::error::Result;
use crate::logging::{LogFormat, init_logging};
use crate::session::{SessionConfig, SessionReport, run_session};

#[derive(Debug, Parser)]
#[command(
    name = "propwire-demo",
    about = "Drive the EQ filter pipeline headlessly and report every repaint",
    version
)]
pub struct Cli {
    /// Cutoff the filter starts at, in Hz.
    #[arg(long, env = "PROPWIRE_DEMO_INITIAL_CUTOFF", default_value_t = DEFAULT_CUTOFF_HZ)]
    pub initial_cutoff: f64,

    /// Slider drag target in Hz. Repeat or comma-separate for a sequence.
    #[arg(long = "drag", env = "PROPWIRE_DEMO_DRAGS", value_delimiter = ',')]
    pub drags: Vec<f64>,

    /// Initial plot width in pixels.
    #[arg(long, env = "PROPWIRE_DEMO_WIDTH", default_value_t = 800)]
    pub width: i32,

    /// Initial plot height in pixels.
    #[arg(long, env = "PROPWIRE_DEMO_HEIGHT", default_value_t = 240)]
    pub height: i32,

    /// Plot resize step as WIDTHxHEIGHT, applied after all drags.
    #[arg(
        long = "resize",
        env = "PROPWIRE_DEMO_RESIZES",
        value_delimiter = ',',
        value_parser = parse_size
    )]
    pub resizes: Vec<Bounds>,

    /// Lowest selectable cutoff in Hz.
    #[arg(long, env = "PROPWIRE_DEMO_MIN_HZ", default_value_t = SliderRange::CUTOFF_MIN_HZ)]
    pub min_hz: f64,

    /// Highest selectable cutoff in Hz.
    #[arg(long, env = "PROPWIRE_DEMO_MAX_HZ", default_value_t = SliderRange::CUTOFF_MAX_HZ)]
    pub max_hz: f64,

    /// Slider step in Hz.
    #[arg(long, env = "PROPWIRE_DEMO_STEP_HZ", default_value_t = SliderRange::CUTOFF_STEP_HZ)]
    pub step_hz: f64,

    /// Number of frequencies the response is sampled at.
    #[arg(long, env = "PROPWIRE_DEMO_SAMPLES", default_value_t = 64)]
    pub samples: usize,

    /// Print the session report as JSON instead of a summary.
    #[arg(long, env = "PROPWIRE_DEMO_JSON")]
    pub json: bool,

    #[arg(long, env = "PROPWIRE_DEMO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Validated session parameters.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let slider_range = SliderRange::new(self.min_hz, self.max_hz, self.step_hz)?;
        SessionConfig {
            pipeline: EqPipelineConfig {
                initial_cutoff_hz: self.initial_cutoff,
                slider_range,
            },
            initial_bounds: Bounds::from_size(self.width, self.height),
            drags_hz: self.drags.clone(),
            resizes: self.resizes.clone(),
            samples: self.samples,
        }
        .validate()
    }
}

fn parse_size(raw: &str) -> std::result::Result<Bounds, String> {
    let (width, height) = raw
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {raw:?}"))?;
    let width = width
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid width {width:?}: {e}"))?;
    let height = height
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid height {height:?}: {e}"))?;
    Ok(Bounds::from_size(width, height))
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_format)?;
    let config = cli.session_config()?;
    let report = run_session(&config);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SessionReport) {
    println!(
        "cutoff: {:.1} Hz -> {:.1} Hz (range {}..{} Hz)",
        report.initial_cutoff_hz,
        report.final_cutoff_hz,
        report.slider_range.min(),
        report.slider_range.max()
    );
    for (index, frame) in report.frames.iter().enumerate() {
        println!(
            "  [{index}] {:?}: cutoff={:.1} Hz repainted={} points={}",
            frame.step, frame.cutoff_hz, frame.repainted, frame.path_points
        );
    }
    println!(
        "recalculations: filter={} plot={}; slider: user={} silent={}",
        report.filter_recalculations,
        report.plot_recalculations,
        report.slider_user_changes,
        report.slider_silent_updates
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DemoError;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_describe_cutoff_slider() {
        let cli = Cli::try_parse_from(["propwire-demo"]).expect("defaults parse");
        let config = cli.session_config().expect("defaults valid");
        assert_eq!(config.pipeline, EqPipelineConfig::default());
        assert_eq!(config.initial_bounds, Bounds::from_size(800, 240));
        assert!(config.drags_hz.is_empty());
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert!(!cli.json);
    }

    #[test]
    fn drags_and_resizes_accumulate() {
        let cli = Cli::try_parse_from([
            "propwire-demo",
            "--drag",
            "500",
            "--drag=1000,2000",
            "--resize",
            "640x200",
            "--resize",
            "320X100",
        ])
        .expect("parse");
        assert_eq!(cli.drags, vec![500.0, 1000.0, 2000.0]);
        assert_eq!(
            cli.resizes,
            vec![Bounds::from_size(640, 200), Bounds::from_size(320, 100)]
        );
    }

    #[test]
    fn malformed_resize_is_a_parse_error() {
        for raw in ["640", "ax2"] {
            let error = Cli::try_parse_from(["propwire-demo", "--resize", raw])
                .expect_err("malformed size");
            assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
            assert_eq!(error.exit_code(), 2);
        }
    }

    #[test]
    fn inverted_range_is_reported() {
        let cli = Cli::try_parse_from(["propwire-demo", "--min-hz", "500", "--max-hz", "100"])
            .expect("parse");
        assert!(matches!(
            cli.session_config(),
            Err(DemoError::SliderRange(_))
        ));
    }

    #[test]
    fn zero_height_is_rejected() {
        let cli = Cli::try_parse_from(["propwire-demo", "--height", "0"]).expect("parse");
        let error = cli.session_config().expect_err("empty plot");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn parse_size_trims_whitespace() {
        assert_eq!(parse_size(" 10 x 20 "), Ok(Bounds::from_size(10, 20)));
    }
}
