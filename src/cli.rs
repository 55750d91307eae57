use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-shrink",
    about = "Shrink every .jpg and .png under a directory through a remote compression service",
    long_about = "img-shrink walks a directory tree, uploads each .jpg/.png between 100KB and ~5MB \
                  to a remote compression endpoint and overwrites the local file with the compressed \
                  result. Subdirectories are always processed. Results are printed and appended to \
                  img-shrink.stdout.log / img-shrink.stderr.log.",
    version,
    after_help = "EXAMPLES:\n  \
    img-shrink -p ./images\n  \
    img-shrink -p ~/Pictures -j 5 --timeout 60\n  \
    img-shrink -p ./assets --log-dir /tmp -q"
)]
pub struct Args {
    #[arg(
        short = 'p',
        long = "path",
        value_name = "PATH",
        help = "Entry directory to scan for images"
    )]
    pub path: PathBuf,

    #[arg(
        short = 'j',
        long,
        value_name = "N",
        help = "Maximum files in flight (default: all at once)",
        long_help = "Caps how many files are uploaded concurrently. \
                     Without it every selected file is started immediately."
    )]
    pub concurrency: Option<usize>,

    #[arg(
        long,
        value_name = "SECS",
        help = "Per-request timeout in seconds (default: 30)"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "URL",
        help = "Compression endpoint (default: https://tinypng.com/web/shrink)"
    )]
    pub endpoint: Option<String>,

    #[arg(
        long,
        help = "Send a randomized browser identity with each upload",
        long_help = "Rotates the user agent, X-Forwarded-For address and request token per upload. \
                     Off by default; it has no effect on results."
    )]
    pub rotate_identity: bool,

    #[arg(long, help = "Accept invalid TLS certificates from the endpoint")]
    pub insecure: bool,

    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding the append-only log files"
    )]
    pub log_dir: PathBuf,

    #[arg(short = 'q', long, conflicts_with = "verbose", help = "Do not print to the console")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print pipeline diagnostics to stderr")]
    pub verbose: bool,
}
