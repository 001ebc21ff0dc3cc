//! Nickname lookup for counselor name matching.
//!
//! Scoutbook reports carry whatever name the counselor typed at signup, so
//! "Mike Johnson" and "Michael Johnson" are routinely the same adult. Each
//! family below maps a canonical given name to the short forms seen in
//! production rosters; variants that are themselves formal names (stephen,
//! jonathan) are folded into one family so either spelling canonicalizes
//! the same way.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical given name → known variants.
const NICKNAME_FAMILIES: &[(&str, &[&str])] = &[
    ("robert", &["bob", "rob", "bobby", "robbie"]),
    ("william", &["bill", "billy", "will", "willie"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("michael", &["mike", "micky", "mick"]),
    ("christopher", &["chris"]),
    ("matthew", &["matt"]),
    ("anthony", &["tony"]),
    ("steven", &["steve", "stevie", "stephen"]),
    ("andrew", &["andy", "drew"]),
    ("joshua", &["josh"]),
    ("kenneth", &["ken", "kenny"]),
    ("kevin", &["kev"]),
    ("edward", &["ed", "eddie", "ted"]),
    ("ronald", &["ron", "ronnie"]),
    ("timothy", &["tim", "timmy"]),
    ("jeffrey", &["jeff", "jeffery"]),
    ("jacob", &["jake"]),
    ("nicholas", &["nick", "nicky"]),
    ("john", &["jack", "jon", "johnny", "jonathan"]),
    ("lawrence", &["larry"]),
    ("benjamin", &["ben", "benny"]),
    ("samuel", &["sam", "sammy"]),
    ("gregory", &["greg"]),
    ("alexander", &["alex"]),
    ("patrick", &["pat"]),
    ("raymond", &["ray"]),
    ("dennis", &["denny"]),
    ("gerald", &["jerry"]),
    ("tyler", &["ty"]),
    ("henry", &["hank"]),
    ("douglas", &["doug"]),
    ("nathan", &["nate"]),
    ("peter", &["pete"]),
    ("zachary", &["zach"]),
    ("alan", &["al"]),
    ("paul", &["paulie"]),
    ("mark", &["marky"]),
];

fn canonical_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map = HashMap::new();
        for (canonical, variants) in NICKNAME_FAMILIES {
            map.insert(*canonical, *canonical);
            for variant in *variants {
                map.insert(*variant, *canonical);
            }
        }
        map
    })
}

/// Look up the canonical form of a lowercase name token.
///
/// Returns `None` for tokens outside the nickname table — the caller keeps
/// the original token in that case.
pub fn canonical_for(token: &str) -> Option<&'static str> {
    canonical_map().get(token).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_maps_to_canonical() {
        assert_eq!(canonical_for("mike"), Some("michael"));
        assert_eq!(canonical_for("bob"), Some("robert"));
        assert_eq!(canonical_for("jack"), Some("john"));
    }

    #[test]
    fn test_canonical_maps_to_itself() {
        assert_eq!(canonical_for("michael"), Some("michael"));
        assert_eq!(canonical_for("robert"), Some("robert"));
    }

    #[test]
    fn test_folded_formal_variants_share_a_family() {
        assert_eq!(canonical_for("stephen"), canonical_for("steven"));
        assert_eq!(canonical_for("jonathan"), canonical_for("jon"));
    }

    #[test]
    fn test_unknown_token_is_none() {
        assert_eq!(canonical_for("xanthippe"), None);
        assert_eq!(canonical_for(""), None);
    }
}
