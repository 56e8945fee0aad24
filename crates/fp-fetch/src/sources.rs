//! Registry of known schedule feeds.

/// Congresses mirrored by the VOC schedule repositories on GitHub.
const CONGRESSES: std::ops::RangeInclusive<u32> = 32..=36;

/// Remote editions served by the VOC data host.
const REMOTE_FEEDS: [&str; 2] = [
    "https://data.c3voc.de/rC3/everything.schedule.json",
    "https://data.c3voc.de/rC3_21/everything.schedule.json",
];

/// Returns the feed URL for the `number`th Chaos Communication Congress.
pub fn congress_url(number: u32) -> String {
    format!("https://raw.githubusercontent.com/voc/{number}C3_schedule/master/everything.schedule.json")
}

/// Returns every known feed URL, oldest edition first.
pub fn default_sources() -> Vec<String> {
    CONGRESSES
        .map(congress_url)
        .chain(REMOTE_FEEDS.iter().map(ToString::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_cover_congresses_and_remote_editions() {
        let sources = default_sources();
        assert_eq!(sources.len(), 7);
        assert_eq!(
            sources[0],
            "https://raw.githubusercontent.com/voc/32C3_schedule/master/everything.schedule.json"
        );
        assert_eq!(
            sources[4],
            "https://raw.githubusercontent.com/voc/36C3_schedule/master/everything.schedule.json"
        );
        assert_eq!(
            sources[6],
            "https://data.c3voc.de/rC3_21/everything.schedule.json"
        );
    }

    #[test]
    fn default_sources_are_unique() {
        let mut sources = default_sources();
        sources.sort();
        sources.dedup();
        assert_eq!(sources.len(), 7);
    }
}
