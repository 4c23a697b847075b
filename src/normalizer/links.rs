//! Venue deep links derived from market identifiers.
//!
//! Best effort: these are plain string templates. A malformed identifier gives
//! a syntactically valid URL that may not resolve to a real market page.

const POLYMARKET_MARKETS: &str = "https://polymarket.com/markets";
const KALSHI_MARKETS: &str = "https://kalshi.com/markets";

/// Number of trailing ticker characters Kalshi uses as the game segment.
const KALSHI_SUFFIX_LEN: usize = 4;

pub fn polymarket_url(slug: &str) -> String {
    format!("{}/{}", POLYMARKET_MARKETS, slug)
}

/// `https://kalshi.com/markets/kx<league>game/<league>-game/<suffix>`, lower-cased.
///
/// The suffix is the last four characters of the ticker (the whole ticker when
/// shorter). This mirrors how the dashboard has always guessed the page and is
/// known not to resolve for every series.
pub fn kalshi_url(ticker: &str, league: Option<&str>) -> String {
    let league = league.unwrap_or_default();
    format!(
        "{}/kx{}game/{}-game/{}",
        KALSHI_MARKETS,
        league,
        league,
        ticker_suffix(ticker)
    )
    .to_lowercase()
}

fn ticker_suffix(ticker: &str) -> &str {
    let count = ticker.chars().count();
    if count <= KALSHI_SUFFIX_LEN {
        return ticker;
    }
    // Char boundary of the first suffix character.
    match ticker.char_indices().nth(count - KALSHI_SUFFIX_LEN) {
        Some((idx, _)) => &ticker[idx..],
        None => ticker,
    }
}
