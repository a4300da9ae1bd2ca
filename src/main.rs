use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use sitegen::Config;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Build a static site from Markdown content")]
struct Cli {
    /// Prefix for root-relative links, e.g. `/my-repo/` (overrides the config)
    base_path: Option<String>,

    /// Config file; built-in defaults are used if it doesn't exist
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Directory of Markdown content
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets copied verbatim
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output directory (its contents are replaced)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn apply_to(self, config: &mut Config) {
        if let Some(base_path) = self.base_path {
            config.site.base_path = base_path;
        }
        if let Some(content) = self.content {
            config.paths.content = content;
        }
        if let Some(static_dir) = self.static_dir {
            config.paths.static_dir = static_dir;
        }
        if let Some(template) = self.template {
            config.paths.template = template;
        }
        if let Some(output) = self.output {
            config.paths.output = output;
        }
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply_to(&mut config);

    let report = match sitegen::site::build(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Created {} pages and copied {} static files into {}",
        report.pages.len(),
        report.static_files,
        config.paths.output.display()
    );
}
