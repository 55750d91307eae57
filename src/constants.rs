use std::time::Duration;

/// Extensions accepted by the remote service. Matched case-sensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "png"];

// Upload limits imposed by the remote service, not adjustable
pub const MIN_FILE_SIZE: u64 = 100_000;
pub const MAX_FILE_SIZE: u64 = 5_200_000;

pub const DEFAULT_ENDPOINT: &str = "https://tinypng.com/web/shrink";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const STDOUT_LOG_FILE: &str = "img-shrink.stdout.log";
pub const STDERR_LOG_FILE: &str = "img-shrink.stderr.log";

pub const REQUEST_TOKEN_HEADER: &str = "postman-token";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// User agent sent when identity rotation is off.
pub const CRATE_USER_AGENT: &str = concat!("img-shrink/", env!("CARGO_PKG_VERSION"));

/// Browser identities rotated per request when identity rotation is on.
pub const USER_AGENTS: [&str; 10] = [
    "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10_6_8; en-us) AppleWebKit/534.50 (KHTML, like Gecko) Version/5.1 Safari/534.50",
    "Mozilla/5.0 (Windows; U; Windows NT 6.1; en-us) AppleWebKit/534.50 (KHTML, like Gecko) Version/5.1 Safari/534.50",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.6; rv,2.0.1) Gecko/20100101 Firefox/4.0.1",
    "Mozilla/5.0 (Windows NT 6.1; rv,2.0.1) Gecko/20100101 Firefox/4.0.1",
    "Opera/9.80 (Macintosh; Intel Mac OS X 10.6.8; U; en) Presto/2.8.131 Version/11.11",
    "Opera/9.80 (Windows NT 6.1; U; en) Presto/2.8.131 Version/11.11",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_7_0) AppleWebKit/535.11 (KHTML, like Gecko) Chrome/17.0.963.56 Safari/535.11",
    "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 5.1; 360SE)",
    "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 5.1; maxthon 2.0)",
    "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 5.1; Trident/4.0; SE 2.X MetaSr 1.0; SE 2.X MetaSr 1.0; .NET CLR 2.0.50727; SE 2.X MetaSr 1.0)",
];

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";
