//! Diesel table definitions.

diesel::table! {
    player_profiles (player_id) {
        player_id -> Int8,
        display_name -> Text,
        archetype -> Text,
        stats -> Jsonb,
        available_points -> Int8,
        character_name -> Text,
        first_name -> Text,
        age -> Int4,
        height_cm -> Int4,
        weight_kg -> Int4,
        profile_image -> Text,
        embed_color -> Int4,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    audit_log (id) {
        id -> Int4,
        player_id -> Int8,
        action -> Text,
        details -> Text,
        actor_id -> Nullable<Int8>,
        timestamp -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(player_profiles, audit_log);
