//! Yahoo key helpers and the trade proposal URL.
//!
//! Yahoo resource keys are dot separated, e.g. league `466.l.12345`, team `466.l.12345.t.1`,
//! player `466.p.100`. The numeric id Yahoo's web pages use is the segment after the last dot.

pub const PROVIDER_DOMAIN: &str = "yahoo.com";

/// Subdomain and path segment of Yahoo's fantasy site for a sport code.
pub fn sport_site(code: &str) -> (String, String) {
    match code {
        "nfl" => ("football.fantasysports".to_string(), "f1".to_string()),
        "nba" => ("basketball.fantasysports".to_string(), "nba".to_string()),
        "mlb" => ("baseball.fantasysports".to_string(), "b1".to_string()),
        "nhl" => ("hockey.fantasysports".to_string(), "hockey".to_string()),
        other => (format!("{}.fantasysports", other), other.to_string()),
    }
}

/// Segment after the last `.` of a key, or the whole key when it has none.
pub fn trailing_id(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Builds the URL of Yahoo's "propose trade" page.
///
/// Offered and requested players share the single repeated `tpids2[]` parameter, offered
/// first, each in the order given.
pub fn propose_trade_url(
    sport_code: &str,
    league_key: &str,
    source_team_key: &str,
    target_team_key: &str,
    offered_player_keys: &[String],
    requested_player_keys: &[String],
) -> String {
    let (subdomain, path) = sport_site(sport_code);

    let mut url = format!(
        "https://{}.{}/{}/{}/{}/proposetrade?stage=1&mid2={}",
        subdomain,
        PROVIDER_DOMAIN,
        path,
        trailing_id(league_key),
        trailing_id(source_team_key),
        trailing_id(target_team_key),
    );

    for player_key in offered_player_keys.iter().chain(requested_player_keys) {
        url.push_str("&tpids2[]=");
        url.push_str(trailing_id(player_key));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_exact_nba_proposal_url() {
        let url = propose_trade_url(
            "nba",
            "466.l.12345",
            "466.l.12345.t.1",
            "466.l.12345.t.2",
            &["466.p.100".to_string()],
            &["466.p.200".to_string()],
        );

        assert_eq!(
            url,
            "https://basketball.fantasysports.yahoo.com/nba/12345/1/proposetrade?stage=1&mid2=2&tpids2[]=100&tpids2[]=200"
        );
    }

    #[test]
    fn keeps_player_order_offered_then_requested() {
        let url = propose_trade_url(
            "nfl",
            "449.l.7",
            "449.l.7.t.3",
            "449.l.7.t.9",
            &["449.p.5".to_string(), "449.p.1".to_string()],
            &["449.p.9".to_string(), "449.p.2".to_string()],
        );

        assert_eq!(
            url,
            "https://football.fantasysports.yahoo.com/f1/7/3/proposetrade?stage=1&mid2=9&tpids2[]=5&tpids2[]=1&tpids2[]=9&tpids2[]=2"
        );
    }

    #[test]
    fn maps_sport_codes() {
        assert_eq!(
            sport_site("mlb"),
            ("baseball.fantasysports".to_string(), "b1".to_string())
        );
        assert_eq!(
            sport_site("nhl"),
            ("hockey.fantasysports".to_string(), "hockey".to_string())
        );
        assert_eq!(
            sport_site("wnba"),
            ("wnba.fantasysports".to_string(), "wnba".to_string())
        );
    }

    #[test]
    fn trailing_id_without_separator() {
        assert_eq!(trailing_id("12345"), "12345");
        assert_eq!(trailing_id("466.l.12345.t.10"), "10");
    }
}
