//! Realistic string values: emails, UUIDs, user agents, IPs and dates.
//!
//! [`StringSource`] is the seam generators use for these values.
//! [`SyntheticStrings`] draws everything from the shared [`RandomSource`]
//! so output stays reproducible under one seed.

use chrono::{DateTime, Duration, Utc};
use synth_core::RandomSource;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy", "mallory",
    "niaj", "olivia", "peggy", "rupert", "sybil", "trent", "victor", "walter", "yuki",
];

const LAST_NAMES: &[&str] = &[
    "smith", "johnson", "tanaka", "garcia", "muller", "rossi", "kim", "nguyen", "silva", "kowalski",
    "dubois", "ivanova", "okafor", "larsen", "sato", "brown",
];

const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.net",
    "example.org",
    "mail.test",
    "inbox.test",
];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    "curl/8.4.0",
    "python-requests/2.31.0",
];

/// Window of [`StringSource::recent_date`], in hours.
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Source of realistic-looking string values.
pub trait StringSource {
    fn email(&self, rng: &mut RandomSource) -> String;

    /// Hyphenated UUID v4.
    fn uuid(&self, rng: &mut RandomSource) -> String;

    fn user_agent(&self, rng: &mut RandomSource) -> String;

    /// Dotted IPv4 address.
    fn ip(&self, rng: &mut RandomSource) -> String;

    /// Instant uniformly drawn in `[from, until]` (millisecond resolution).
    fn date_between(
        &self,
        rng: &mut RandomSource,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DateTime<Utc>;

    /// Instant within the day before `now`.
    fn recent_date(&self, rng: &mut RandomSource, now: DateTime<Utc>) -> DateTime<Utc> {
        self.date_between(rng, now - Duration::hours(RECENT_WINDOW_HOURS), now)
    }
}

/// Default [`StringSource`] backed by built-in word lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticStrings;

impl StringSource for SyntheticStrings {
    fn email(&self, rng: &mut RandomSource) -> String {
        let first = pick(rng, FIRST_NAMES);
        let last = pick(rng, LAST_NAMES);
        let number = rng.random_int(1, 99).unwrap_or(1);
        let domain = pick(rng, EMAIL_DOMAINS);
        format!("{first}.{last}{number}@{domain}")
    }

    fn uuid(&self, rng: &mut RandomSource) -> String {
        generate_uuid_v4(rng).to_string()
    }

    fn user_agent(&self, rng: &mut RandomSource) -> String {
        pick(rng, USER_AGENTS).to_string()
    }

    fn ip(&self, rng: &mut RandomSource) -> String {
        let mut octets = [0u8; 4];
        rng.fill_bytes(&mut octets);
        format!(
            "{}.{}.{}.{}",
            octets[0], octets[1], octets[2], octets[3]
        )
    }

    fn date_between(
        &self,
        rng: &mut RandomSource,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DateTime<Utc> {
        match rng.random_int(from.timestamp_millis(), until.timestamp_millis()) {
            Some(millis) => DateTime::from_timestamp_millis(millis).unwrap_or(from),
            // from > until
            None => from,
        }
    }
}

/// Generate a random UUID v4 using the provided source.
pub fn generate_uuid_v4(rng: &mut RandomSource) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

fn pick<'a>(rng: &mut RandomSource, items: &[&'a str]) -> &'a str {
    rng.random_index(items.len())
        .map(|idx| items[idx])
        .unwrap_or_default()
}
