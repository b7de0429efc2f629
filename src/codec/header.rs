use serde::Serialize;

use crate::codec::preamble::{WorldPreamble, SECTION_HEADER};
use crate::codec::reader::ByteCursor;
use crate::error::{Error, Result};

/// Difficulty encoding. Saves older than version 209 store a single expert
/// flag; newer saves store a numeric game mode plus the special-seed flags
/// that accumulated across 1.4.x. The two shapes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameMode {
    Legacy {
        expert: bool,
    },
    Modern {
        mode: i32,
        drunk: Option<bool>,             // >= 222
        get_good: Option<bool>,          // >= 227
        tenth_anniversary: Option<bool>, // >= 238
        dont_starve: Option<bool>,       // >= 239
        not_the_bees: Option<bool>,      // >= 241
        remix: Option<bool>,             // >= 249
        no_traps: Option<bool>,          // >= 266
        zenith: Option<bool>,            // >= 267
    },
}

/// Lantern night event state (version >= 207).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanternNight {
    pub cooldown: i32,
    pub genuine: bool,
    pub manual: bool,
    pub next_night_is_lantern_night: bool,
}

/// Decoded world metadata.
///
/// Fields gated on a structural version above the supported minimum are
/// `Option`s; `None` means the field does not exist in the file, which is
/// distinct from a decoded zero/false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldHeader {
    pub name: String,
    pub seed: String,
    pub worldgen_version: u64,
    pub guid: [u8; 16],
    pub id: i32,
    pub bounds: (i32, i32, i32, i32), // left, right, top, bottom in pixels
    pub max_tiles_y: i32,
    pub max_tiles_x: i32,
    pub game_mode: GameMode,
    pub creation_time: i64,
    pub moon_type: u8,
    pub tree_x: [i32; 3],
    pub tree_style: [i32; 4],
    pub cave_back_x: [i32; 3],
    pub cave_back_style: [i32; 4],
    pub ice_back_style: i32,
    pub jungle_back_style: i32,
    pub hell_back_style: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    /// First underground row, as a fractional tile row.
    pub surface_level: f64,
    /// First cavern row, as a fractional tile row.
    pub rock_level: f64,
    pub time: f64,
    pub day_time: bool,
    pub moon_phase: i32,
    pub blood_moon: bool,
    pub eclipse: bool,
    pub dungeon_x: i32,
    pub dungeon_y: i32,
    pub crimson: bool,
    pub downed_eye_of_cthulhu: bool,
    pub downed_eater_of_worlds: bool,
    pub downed_skeletron: bool,
    pub downed_queen_bee: bool,
    pub downed_destroyer: bool,
    pub downed_twins: bool,
    pub downed_skeletron_prime: bool,
    pub downed_any_mech_boss: bool,
    pub downed_plantera: bool,
    pub downed_golem: bool,
    pub downed_king_slime: bool,
    pub saved_goblin: bool,
    pub saved_wizard: bool,
    pub saved_mechanic: bool,
    pub downed_goblin_army: bool,
    pub downed_clown: bool,
    pub downed_frost_legion: bool,
    pub downed_pirates: bool,
    pub shadow_orb_smashed: bool,
    pub spawn_meteor: bool,
    pub shadow_orb_count: u8,
    pub altar_count: i32,
    pub hard_mode: bool,
    pub after_party_of_doom: Option<bool>, // >= 257
    pub invasion_delay: i32,
    pub invasion_size: i32,
    pub invasion_type: i32,
    pub invasion_x: f64,
    pub slime_rain_time: f64,
    pub sundial_cooldown: u8,
    pub raining: bool,
    pub rain_time: i32,
    pub max_rain: f32,
    pub ore_tier_1: i32,
    pub ore_tier_2: i32,
    pub ore_tier_3: i32,
    /// Tree, corruption, jungle, snow, hallow, crimson, desert, ocean.
    pub background_styles: [u8; 8],
    pub cloud_bg_active: i32,
    pub num_clouds: i16,
    pub wind_speed: f32,
    pub anglers_finished_today: Vec<String>,
    pub saved_angler: bool,
    pub angler_quest: i32,
    pub saved_stylist: bool,
    pub saved_tax_collector: bool,
    pub saved_golfer: Option<bool>, // >= 201
    pub invasion_size_start: i32,
    pub cultist_delay: i32,
    pub kill_counts: Vec<i32>,
    pub fast_forward_time: bool,
    pub downed_fishron: bool,
    pub downed_martians: bool,
    pub downed_cultist: bool,
    pub downed_moonlord: bool,
    pub downed_halloween_king: bool,
    pub downed_halloween_tree: bool,
    pub downed_christmas_ice_queen: bool,
    pub downed_christmas_santank: bool,
    pub downed_christmas_tree: bool,
    pub downed_tower_solar: bool,
    pub downed_tower_vortex: bool,
    pub downed_tower_nebula: bool,
    pub downed_tower_stardust: bool,
    pub tower_active_solar: bool,
    pub tower_active_vortex: bool,
    pub tower_active_nebula: bool,
    pub tower_active_stardust: bool,
    pub lunar_apocalypse: bool,
    pub party_manual: bool,
    pub party_genuine: bool,
    pub party_cooldown: i32,
    pub partying_npcs: Vec<i32>,
    pub sandstorm_happening: bool,
    pub sandstorm_time_left: i32,
    pub sandstorm_severity: f32,
    pub sandstorm_intended_severity: f32,
    pub saved_bartender: bool,
    pub downed_invasion_tier_1: bool,
    pub downed_invasion_tier_2: bool,
    pub downed_invasion_tier_3: bool,
    pub mushroom_bg_style: u8,
    pub combat_book_used: Option<bool>,        // >= 204
    pub lantern_night: Option<LanternNight>,   // >= 207
    pub tree_top_styles: Option<Vec<i32>>,     // >= 211
    pub force_halloween_for_today: Option<bool>, // >= 211
    pub force_christmas_for_today: Option<bool>, // >= 211
}

/// Decode the world header section.
///
/// One strictly ordered linear pass: every field's byte position depends on
/// every prior field having been consumed, so there is no recovery from a
/// mid-pass fault and no backtracking. The section holds more data past the
/// last field we need (town NPC state, chest contents bookkeeping, ...);
/// stopping early is safe because every section is located by its pointer,
/// not by the previous section's end.
pub fn decode_header(cursor: &mut ByteCursor, preamble: &WorldPreamble) -> Result<WorldHeader> {
    let offset = preamble
        .section_offset(SECTION_HEADER)
        .ok_or_else(|| Error::HeaderDecode("file has no header section".into()))?;
    cursor.seek(offset);
    read_header(cursor, preamble.version).map_err(|e| match e {
        Error::HeaderDecode(_) => e,
        other => Error::HeaderDecode(other.to_string()),
    })
}

fn read_header(c: &mut ByteCursor, version: i32) -> Result<WorldHeader> {
    let name = c.read_string()?;
    let seed = c.read_string()?;
    let worldgen_version = c.read_u64()?;
    let mut guid = [0u8; 16];
    guid.copy_from_slice(&c.read_bytes(16)?);
    let id = c.read_i32()?;
    let bounds = (c.read_i32()?, c.read_i32()?, c.read_i32()?, c.read_i32()?);
    let max_tiles_y = c.read_i32()?;
    let max_tiles_x = c.read_i32()?;

    let game_mode = if version >= 209 {
        GameMode::Modern {
            mode: c.read_i32()?,
            drunk: gated(c, version, 222)?,
            get_good: gated(c, version, 227)?,
            tenth_anniversary: gated(c, version, 238)?,
            dont_starve: gated(c, version, 239)?,
            not_the_bees: gated(c, version, 241)?,
            remix: gated(c, version, 249)?,
            no_traps: gated(c, version, 266)?,
            zenith: gated(c, version, 267)?,
        }
    } else {
        GameMode::Legacy { expert: c.read_bool()? }
    };

    let creation_time = c.read_i64()?;
    let moon_type = c.read_u8()?;
    let tree_x = [c.read_i32()?, c.read_i32()?, c.read_i32()?];
    let tree_style = [c.read_i32()?, c.read_i32()?, c.read_i32()?, c.read_i32()?];
    let cave_back_x = [c.read_i32()?, c.read_i32()?, c.read_i32()?];
    let cave_back_style = [c.read_i32()?, c.read_i32()?, c.read_i32()?, c.read_i32()?];
    let ice_back_style = c.read_i32()?;
    let jungle_back_style = c.read_i32()?;
    let hell_back_style = c.read_i32()?;
    let spawn_x = c.read_i32()?;
    let spawn_y = c.read_i32()?;
    let surface_level = c.read_f64()?;
    let rock_level = c.read_f64()?;
    let time = c.read_f64()?;
    let day_time = c.read_bool()?;
    let moon_phase = c.read_i32()?;
    let blood_moon = c.read_bool()?;
    let eclipse = c.read_bool()?;
    let dungeon_x = c.read_i32()?;
    let dungeon_y = c.read_i32()?;
    let crimson = c.read_bool()?;

    let downed_eye_of_cthulhu = c.read_bool()?;
    let downed_eater_of_worlds = c.read_bool()?;
    let downed_skeletron = c.read_bool()?;
    let downed_queen_bee = c.read_bool()?;
    let downed_destroyer = c.read_bool()?;
    let downed_twins = c.read_bool()?;
    let downed_skeletron_prime = c.read_bool()?;
    let downed_any_mech_boss = c.read_bool()?;
    let downed_plantera = c.read_bool()?;
    let downed_golem = c.read_bool()?;
    let downed_king_slime = c.read_bool()?;
    let saved_goblin = c.read_bool()?;
    let saved_wizard = c.read_bool()?;
    let saved_mechanic = c.read_bool()?;
    let downed_goblin_army = c.read_bool()?;
    let downed_clown = c.read_bool()?;
    let downed_frost_legion = c.read_bool()?;
    let downed_pirates = c.read_bool()?;

    let shadow_orb_smashed = c.read_bool()?;
    let spawn_meteor = c.read_bool()?;
    let shadow_orb_count = c.read_u8()?;
    let altar_count = c.read_i32()?;
    let hard_mode = c.read_bool()?;
    let after_party_of_doom = gated(c, version, 257)?;
    let invasion_delay = c.read_i32()?;
    let invasion_size = c.read_i32()?;
    let invasion_type = c.read_i32()?;
    let invasion_x = c.read_f64()?;
    let slime_rain_time = c.read_f64()?;
    let sundial_cooldown = c.read_u8()?;
    let raining = c.read_bool()?;
    let rain_time = c.read_i32()?;
    let max_rain = c.read_f32()?;
    let ore_tier_1 = c.read_i32()?;
    let ore_tier_2 = c.read_i32()?;
    let ore_tier_3 = c.read_i32()?;

    let mut background_styles = [0u8; 8];
    for style in &mut background_styles {
        *style = c.read_u8()?;
    }
    let cloud_bg_active = c.read_i32()?;
    let num_clouds = c.read_i16()?;
    let wind_speed = c.read_f32()?;

    let angler_count = c.read_i32()?;
    if angler_count < 0 {
        return Err(Error::HeaderDecode(format!("negative angler count {angler_count}")));
    }
    // A count can claim more elements than the buffer holds; reserve only
    // what could physically exist and let the element reads hit EOF.
    let mut anglers_finished_today = Vec::with_capacity((angler_count as usize).min(c.remaining()));
    for _ in 0..angler_count {
        anglers_finished_today.push(c.read_string()?);
    }
    let saved_angler = c.read_bool()?;
    let angler_quest = c.read_i32()?;
    let saved_stylist = c.read_bool()?;
    let saved_tax_collector = c.read_bool()?;
    let saved_golfer = gated(c, version, 201)?;
    let invasion_size_start = c.read_i32()?;
    let cultist_delay = c.read_i32()?;

    let kill_count = c.read_i16()?;
    if kill_count < 0 {
        return Err(Error::HeaderDecode(format!("negative kill-count length {kill_count}")));
    }
    let mut kill_counts = Vec::with_capacity((kill_count as usize).min(c.remaining()));
    for _ in 0..kill_count {
        kill_counts.push(c.read_i32()?);
    }
    let fast_forward_time = c.read_bool()?;

    let downed_fishron = c.read_bool()?;
    let downed_martians = c.read_bool()?;
    let downed_cultist = c.read_bool()?;
    let downed_moonlord = c.read_bool()?;
    let downed_halloween_king = c.read_bool()?;
    let downed_halloween_tree = c.read_bool()?;
    let downed_christmas_ice_queen = c.read_bool()?;
    let downed_christmas_santank = c.read_bool()?;
    let downed_christmas_tree = c.read_bool()?;
    let downed_tower_solar = c.read_bool()?;
    let downed_tower_vortex = c.read_bool()?;
    let downed_tower_nebula = c.read_bool()?;
    let downed_tower_stardust = c.read_bool()?;
    let tower_active_solar = c.read_bool()?;
    let tower_active_vortex = c.read_bool()?;
    let tower_active_nebula = c.read_bool()?;
    let tower_active_stardust = c.read_bool()?;
    let lunar_apocalypse = c.read_bool()?;

    let party_manual = c.read_bool()?;
    let party_genuine = c.read_bool()?;
    let party_cooldown = c.read_i32()?;
    let partier_count = c.read_i32()?;
    if partier_count < 0 {
        return Err(Error::HeaderDecode(format!("negative partier count {partier_count}")));
    }
    let mut partying_npcs = Vec::with_capacity((partier_count as usize).min(c.remaining()));
    for _ in 0..partier_count {
        partying_npcs.push(c.read_i32()?);
    }

    let sandstorm_happening = c.read_bool()?;
    let sandstorm_time_left = c.read_i32()?;
    let sandstorm_severity = c.read_f32()?;
    let sandstorm_intended_severity = c.read_f32()?;
    let saved_bartender = c.read_bool()?;
    let downed_invasion_tier_1 = c.read_bool()?;
    let downed_invasion_tier_2 = c.read_bool()?;
    let downed_invasion_tier_3 = c.read_bool()?;
    let mushroom_bg_style = c.read_u8()?;
    let combat_book_used = gated(c, version, 204)?;

    let lantern_night = if version >= 207 {
        Some(LanternNight {
            cooldown: c.read_i32()?,
            genuine: c.read_bool()?,
            manual: c.read_bool()?,
            next_night_is_lantern_night: c.read_bool()?,
        })
    } else {
        None
    };

    let (tree_top_styles, force_halloween_for_today, force_christmas_for_today) =
        if version >= 211 {
            let count = c.read_i32()?;
            if count < 0 {
                return Err(Error::HeaderDecode(format!("negative tree-top count {count}")));
            }
            let mut styles = Vec::with_capacity((count as usize).min(c.remaining()));
            for _ in 0..count {
                styles.push(c.read_i32()?);
            }
            (Some(styles), Some(c.read_bool()?), Some(c.read_bool()?))
        } else {
            (None, None, None)
        };

    Ok(WorldHeader {
        name,
        seed,
        worldgen_version,
        guid,
        id,
        bounds,
        max_tiles_y,
        max_tiles_x,
        game_mode,
        creation_time,
        moon_type,
        tree_x,
        tree_style,
        cave_back_x,
        cave_back_style,
        ice_back_style,
        jungle_back_style,
        hell_back_style,
        spawn_x,
        spawn_y,
        surface_level,
        rock_level,
        time,
        day_time,
        moon_phase,
        blood_moon,
        eclipse,
        dungeon_x,
        dungeon_y,
        crimson,
        downed_eye_of_cthulhu,
        downed_eater_of_worlds,
        downed_skeletron,
        downed_queen_bee,
        downed_destroyer,
        downed_twins,
        downed_skeletron_prime,
        downed_any_mech_boss,
        downed_plantera,
        downed_golem,
        downed_king_slime,
        saved_goblin,
        saved_wizard,
        saved_mechanic,
        downed_goblin_army,
        downed_clown,
        downed_frost_legion,
        downed_pirates,
        shadow_orb_smashed,
        spawn_meteor,
        shadow_orb_count,
        altar_count,
        hard_mode,
        after_party_of_doom,
        invasion_delay,
        invasion_size,
        invasion_type,
        invasion_x,
        slime_rain_time,
        sundial_cooldown,
        raining,
        rain_time,
        max_rain,
        ore_tier_1,
        ore_tier_2,
        ore_tier_3,
        background_styles,
        cloud_bg_active,
        num_clouds,
        wind_speed,
        anglers_finished_today,
        saved_angler,
        angler_quest,
        saved_stylist,
        saved_tax_collector,
        saved_golfer,
        invasion_size_start,
        cultist_delay,
        kill_counts,
        fast_forward_time,
        downed_fishron,
        downed_martians,
        downed_cultist,
        downed_moonlord,
        downed_halloween_king,
        downed_halloween_tree,
        downed_christmas_ice_queen,
        downed_christmas_santank,
        downed_christmas_tree,
        downed_tower_solar,
        downed_tower_vortex,
        downed_tower_nebula,
        downed_tower_stardust,
        tower_active_solar,
        tower_active_vortex,
        tower_active_nebula,
        tower_active_stardust,
        lunar_apocalypse,
        party_manual,
        party_genuine,
        party_cooldown,
        partying_npcs,
        sandstorm_happening,
        sandstorm_time_left,
        sandstorm_severity,
        sandstorm_intended_severity,
        saved_bartender,
        downed_invasion_tier_1,
        downed_invasion_tier_2,
        downed_invasion_tier_3,
        mushroom_bg_style,
        combat_book_used,
        lantern_night,
        tree_top_styles,
        force_halloween_for_today,
        force_christmas_for_today,
    })
}

/// Decode a version-gated boolean: present at or above `threshold`, absent
/// (never defaulted) below it.
fn gated(c: &mut ByteCursor, version: i32, threshold: i32) -> Result<Option<bool>> {
    if version >= threshold {
        Ok(Some(c.read_bool()?))
    } else {
        Ok(None)
    }
}
