// Candidate pools and roster bookkeeping.

use std::collections::{HashMap, HashSet};

use crate::stats::Sport;

/// Demonstration NBA draft pool: consensus first-round-caliber fantasy names.
pub const NBA_DEFAULT_POOL: &[&str] = &[
    "Nikola Jokic",
    "Luka Doncic",
    "Shai Gilgeous-Alexander",
    "Jayson Tatum",
    "Anthony Edwards",
    "Victor Wembanyama",
    "Tyrese Haliburton",
    "Domantas Sabonis",
    "LeBron James",
    "Kevin Durant",
    "Damian Lillard",
    "Devin Booker",
    "Anthony Davis",
    "Trae Young",
    "Bam Adebayo",
    "De'Aaron Fox",
    "Donovan Mitchell",
    "Jalen Brunson",
    "Jaren Jackson Jr",
    "Chet Holmgren",
    "Paolo Banchero",
    "Scottie Barnes",
    "Darius Garland",
    "Tyler Herro",
    "Lauri Markkanen",
    "Franz Wagner",
    "Cade Cunningham",
    "Tyrese Maxey",
    "Desmond Bane",
    "Dejounte Murray",
];

/// Demonstration MLB draft pool: a mix of elite hitters and arms.
pub const MLB_DEFAULT_POOL: &[&str] = &[
    "Shohei Ohtani",
    "Aaron Judge",
    "Ronald Acuna Jr",
    "Mookie Betts",
    "Freddie Freeman",
    "Trea Turner",
    "Juan Soto",
    "Corey Seager",
    "Bobby Witt Jr",
    "Julio Rodriguez",
    "Corbin Carroll",
    "Gunnar Henderson",
    "Elly De La Cruz",
    "Marcus Semien",
    "Vladimir Guerrero Jr",
    "Spencer Strider",
    "Zack Wheeler",
    "Gerrit Cole",
    "Corbin Burnes",
    "Yoshinobu Yamamoto",
    "Dylan Cease",
    "Logan Webb",
    "Bryce Harper",
    "Matt Olson",
    "Pete Alonso",
    "Bo Bichette",
    "Jose Ramirez",
    "Kyle Tucker",
    "Adley Rutschman",
    "Jackson Chourio",
];

/// The default candidate pool for a sport.
pub fn default_pool(sport: Sport) -> Vec<String> {
    let names = match sport {
        Sport::Nba => NBA_DEFAULT_POOL,
        Sport::Mlb => MLB_DEFAULT_POOL,
    };
    names.iter().map(|n| n.to_string()).collect()
}

/// Filter a pool down to candidates whose names do not case-insensitively
/// match any drafted name.
pub fn filter_drafted(pool: &[String], drafted: &[String]) -> Vec<String> {
    let drafted_lower: HashSet<String> = drafted.iter().map(|n| n.trim().to_lowercase()).collect();
    pool.iter()
        .filter(|name| !drafted_lower.contains(&name.to_lowercase()))
        .cloned()
        .collect()
}

/// Count how many players the roster holds at each position.
///
/// Position lookups for rostered players are not wired to the stat providers
/// yet, so this reports no positions held and the positional-need bonus
/// applies to every candidate.
// TODO: resolve roster positions through the stat providers so the need bonus
// only fires for genuinely empty slots.
pub fn roster_position_counts(_roster: &[String], _sport: Sport) -> HashMap<String, usize> {
    HashMap::new()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafted_filter_is_case_insensitive() {
        let pool = vec![
            "Nikola Jokic".to_string(),
            "Luka Doncic".to_string(),
            "Jayson Tatum".to_string(),
        ];
        let drafted = vec!["NIKOLA JOKIC".to_string(), " luka doncic ".to_string()];

        let available = filter_drafted(&pool, &drafted);
        assert_eq!(available, vec!["Jayson Tatum".to_string()]);
    }

    #[test]
    fn empty_drafted_list_keeps_the_pool_in_order() {
        let pool = default_pool(Sport::Nba);
        let available = filter_drafted(&pool, &[]);
        assert_eq!(available, pool);
    }

    #[test]
    fn roster_counts_are_stubbed_empty() {
        let roster = vec!["Somebody".to_string()];
        assert!(roster_position_counts(&roster, Sport::Mlb).is_empty());
    }
}
