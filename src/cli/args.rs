use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(
    name = "release-helper",
    version,
    about = "Bump versions with commitizen + standard-version and extract release notes"
)]
pub struct Args {
    /// The operation to perform [ bump | notes ]
    pub operation: String,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,
}
