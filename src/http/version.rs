use std::fmt;
use std::str::FromStr;

const PROTOCOL: &str = "HTTP";

/// HTTP protocol version as it appears in a request or status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const HTTP_10: Version = Version { major: 1, minor: 0 };
    pub const HTTP_11: Version = Version { major: 1, minor: 1 };
}

impl Default for Version {
    fn default() -> Self {
        Version::HTTP_11
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.{}", PROTOCOL, self.major, self.minor)
    }
}

/// Parses `HTTP/<major>.<minor>`.
///
/// ```
/// # use uds_http::http::version::Version;
/// assert_eq!("HTTP/1.0".parse::<Version>(), Ok(Version::HTTP_10));
/// assert!("HTTP/2".parse::<Version>().is_err());
/// ```
impl FromStr for Version {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, number) = s.split_once('/').ok_or(())?;
        if protocol != PROTOCOL {
            return Err(());
        }

        let (major, minor) = number.split_once('.').ok_or(())?;
        Ok(Version {
            major: parse_digits(major)?,
            minor: parse_digits(minor)?,
        })
    }
}

// u8::from_str would also accept a leading '+'
fn parse_digits(s: &str) -> Result<u8, ()> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(());
    }
    s.parse().map_err(|_| ())
}
