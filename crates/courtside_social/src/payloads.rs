//! Structured presentation payloads.
//!
//! The command layer returns plain data; whatever renders it (embed, plain
//! message, test assertion) decides the final look.

use courtside_core::{
    Allocation, LedgerConfig, Profile, Stat, overall_rating, suggested_position,
};
use serde_json::{Value as JsonValue, json};

/// Ten-segment visual bar for a stat value.
pub fn stat_bar(value: i64, max: i64) -> String {
    let filled = ((value.clamp(0, max)) * 10 / max.max(1)) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Full profile card payload.
pub fn profile_payload(profile: &Profile, config: &LedgerConfig) -> JsonValue {
    let stats: Vec<JsonValue> = profile
        .stats
        .iter()
        .map(|(stat, value)| {
            json!({
                "name": stat.display_name(),
                "abbreviation": stat.abbreviation(),
                "emoji": stat.emoji(),
                "value": value,
                "max": config.stat_max,
                "bar": stat_bar(value, config.stat_max),
            })
        })
        .collect();

    let rating = overall_rating(&profile.stats, config.stat_max);

    json!({
        "player_id": profile.player_id,
        "display_name": &profile.display_name,
        "archetype": {
            "name": profile.archetype.display_name(),
            "description": profile.archetype.description(),
            "position": profile.archetype.position().label(),
        },
        "stats": stats,
        "available_points": profile.available_points,
        "total_stats": profile.total_stats(),
        "total_max": config.stat_max * Stat::ALL.len() as i64,
        "rating": {
            "grade": rating.grade.to_string(),
            "label": rating.label,
            "average": rating.average,
        },
        "suggested_position": suggested_position(&profile.stats).display_name(),
        "personalization": {
            "character_name": &profile.character_name,
            "first_name": &profile.first_name,
            "age": profile.age,
            "height_cm": profile.height_cm,
            "weight_kg": profile.weight_kg,
            "profile_image": &profile.profile_image,
        },
        "embed_color": profile.embed_color,
        "created_at": profile.created_at.format("%d/%m/%Y").to_string(),
    })
}

/// Payload for a successful point allocation.
pub fn allocation_payload(allocation: &Allocation, total: i64, config: &LedgerConfig) -> JsonValue {
    json!({
        "stat": allocation.stat.display_name(),
        "emoji": allocation.stat.emoji(),
        "old_value": allocation.old_value,
        "new_value": allocation.new_value,
        "points_spent": allocation.new_value - allocation.old_value,
        "remaining_points": allocation.remaining_points,
        "total_stats": total,
        "total_max": config.stat_max * Stat::ALL.len() as i64,
    })
}

/// Leaderboard payload: top entries descending by the chosen criterion.
pub fn leaderboard_payload(
    ranked: &[Profile],
    criterion: Option<Stat>,
    config: &LedgerConfig,
    top: usize,
) -> JsonValue {
    let rows: Vec<JsonValue> = ranked
        .iter()
        .take(top)
        .enumerate()
        .map(|(i, profile)| {
            let (value, max) = match criterion {
                Some(stat) => (profile.stats.get(stat), config.stat_max),
                None => (
                    profile.total_stats(),
                    config.stat_max * Stat::ALL.len() as i64,
                ),
            };
            json!({
                "rank": i + 1,
                "player_id": profile.player_id,
                "display_name": &profile.display_name,
                "archetype": profile.archetype.display_name(),
                "value": value,
                "max": max,
            })
        })
        .collect();

    json!({
        "criterion": criterion.map(|s| s.display_name()).unwrap_or("total"),
        "rows": rows,
        "player_count": ranked.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::{Archetype, BASE_STAT, STAT_MAX};

    fn profile() -> Profile {
        let now = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc();
        Profile::create(42, "Dunkan", Archetype::Pivot, BASE_STAT, STAT_MAX, now)
    }

    #[test]
    fn bar_scales_to_ten_segments() {
        assert_eq!(stat_bar(0, 1000), "░░░░░░░░░░");
        assert_eq!(stat_bar(500, 1000), "█████░░░░░");
        assert_eq!(stat_bar(1000, 1000), "██████████");
    }

    #[test]
    fn profile_payload_carries_all_eight_stats() {
        let payload = profile_payload(&profile(), &LedgerConfig::default());
        assert_eq!(payload["stats"].as_array().unwrap().len(), 8);
        assert_eq!(payload["total_stats"], 4020);
        assert_eq!(payload["total_max"], 8000);
        assert_eq!(payload["archetype"]["position"], "Center");
        assert_eq!(payload["suggested_position"], "Pivot");
    }

    #[test]
    fn leaderboard_payload_caps_rows_but_reports_full_count() {
        let profiles: Vec<Profile> = (0..12)
            .map(|i| {
                let now = chrono::DateTime::from_timestamp(1_700_000_000, 0)
                    .unwrap()
                    .naive_utc();
                Profile::create(i, format!("p{i}"), Archetype::Generaliste, BASE_STAT, STAT_MAX, now)
            })
            .collect();

        let payload = leaderboard_payload(&profiles, None, &LedgerConfig::default(), 10);
        assert_eq!(payload["rows"].as_array().unwrap().len(), 10);
        assert_eq!(payload["player_count"], 12);
        assert_eq!(payload["rows"][0]["rank"], 1);
    }
}
