//! Flat map colors, approximating the game's own minimap palette.
//! Process-wide constants; nothing here is ever mutated.

use crate::codec::tiles::LiquidKind;

pub type Rgb = [u8; 3];

/// Highest block id the static table covers; ids above it use the cyclic
/// fallback palette instead of the sentinel.
pub const MAX_STATIC_BLOCK_ID: u16 = 419;

/// Stands in for ids inside the static range that have no entry.
pub const UNKNOWN_BLOCK: Rgb = [255, 0, 255];

/// Stands in for walls with no entry.
pub const UNKNOWN_WALL: Rgb = [42, 42, 42];

pub const BACKGROUND_SKY: Rgb = [155, 209, 255];
pub const BACKGROUND_UNDERGROUND: Rgb = [134, 94, 65];
pub const BACKGROUND_CAVERN: Rgb = [86, 74, 69];
pub const BACKGROUND_HELL: Rgb = [50, 36, 45];

/// Deterministic palette for modded/unknown high block ids.
pub const FALLBACK_PALETTE: [Rgb; 12] = [
    [198, 113, 113],
    [198, 156, 113],
    [198, 198, 113],
    [156, 198, 113],
    [113, 198, 113],
    [113, 198, 156],
    [113, 198, 198],
    [113, 156, 198],
    [113, 113, 198],
    [156, 113, 198],
    [198, 113, 198],
    [198, 113, 156],
];

/// Map color for a block id within the static range.
pub fn block_color(id: u16) -> Option<Rgb> {
    let rgb = match id {
        0 => [151, 107, 75],   // dirt
        1 => [128, 128, 128],  // stone
        2 => [28, 216, 94],    // grass
        3 | 73 => [27, 197, 109], // plants
        4 => [253, 221, 3],    // torch
        5 => [169, 125, 93],   // tree
        6 => [140, 101, 80],   // iron ore
        7 => [150, 67, 22],    // copper ore
        8 => [185, 164, 23],   // gold ore
        9 => [185, 194, 195],  // silver ore
        10 | 11 => [119, 105, 79], // doors
        12 => [174, 24, 69],   // life crystal
        13 => [133, 213, 247], // bottles
        14 | 15 | 18 => [191, 142, 111], // wooden furniture
        16 => [140, 130, 116], // anvil
        17 => [144, 148, 144], // furnace
        19 => [191, 142, 111], // platform
        21 => [174, 129, 92],  // chest
        22 => [98, 95, 167],   // demonite
        23 => [141, 137, 223], // corrupt grass
        24 => [122, 116, 218], // corrupt plants
        25 => [75, 74, 102],   // ebonstone
        26 => [119, 101, 125], // demon altar
        27 => [226, 196, 49],  // sunflower
        28 => [151, 79, 80],   // pot
        29 => [175, 105, 128], // piggy bank
        30 => [168, 121, 87],  // wood
        31 => [141, 120, 168], // shadow orb
        32 => [151, 135, 183], // corruption thorns
        33 => [253, 221, 3],   // candle
        34..=36 => [235, 166, 135], // chandeliers
        37 => [104, 86, 84],   // meteorite
        38 => [129, 129, 129], // gray brick
        39 => [149, 51, 52],   // red brick
        40 => [146, 81, 68],   // clay
        41 => [59, 71, 101],   // blue dungeon brick
        42 => [253, 221, 3],   // hanging lantern
        43 => [54, 83, 72],    // green dungeon brick
        44 => [119, 67, 92],   // pink dungeon brick
        45 => [185, 164, 23],  // gold brick
        46 => [185, 194, 195], // silver brick
        47 => [150, 67, 22],   // copper brick
        48 => [128, 128, 128], // spikes
        49 => [43, 143, 255],  // water candle
        50 => [170, 48, 114],  // books
        51 => [192, 202, 203], // cobweb
        52 | 62 => [23, 177, 76], // vines
        53 => [255, 218, 56],  // sand
        54 => [144, 195, 232], // glass
        55 => [191, 142, 111], // sign
        56 => [87, 81, 173],   // obsidian
        57 => [68, 68, 76],    // ash
        58 => [102, 34, 34],   // hellstone
        59 => [92, 68, 73],    // mud
        60 => [143, 215, 29],  // jungle grass
        61 | 74 => [103, 189, 13], // jungle plants
        63 => [42, 72, 189],   // sapphire
        64 => [190, 39, 64],   // ruby
        65 => [39, 190, 71],   // emerald
        66 => [195, 194, 38],  // topaz
        67 => [154, 40, 188],  // amethyst
        68 => [223, 230, 238], // diamond
        69 => [80, 62, 44],    // jungle thorns
        70 => [93, 127, 255],  // mushroom grass
        71 | 72 => [177, 157, 216], // glowing mushrooms
        75 => [38, 38, 43],    // obsidian brick
        76 => [142, 66, 66],   // hellstone brick
        77 => [107, 68, 99],   // hellforge
        78 => [146, 81, 68],   // clay pot
        79 => [191, 142, 111], // bed
        80 => [73, 120, 17],   // cactus
        81 => [255, 112, 81],  // coral
        82..=84 => [27, 197, 109], // herbs
        85 => [192, 192, 192], // tombstone
        86..=90 => [191, 142, 111], // wooden furniture
        91 => [13, 88, 130],   // banner
        92 | 93 => [213, 229, 237], // lamp posts
        94..=100 => [191, 142, 111], // benches, bathtubs
        101 | 102 => [191, 142, 111],
        103 => [141, 98, 77],  // bowl
        104 => [191, 142, 111], // grandfather clock
        105 => [144, 148, 144], // statue
        106 => [191, 142, 111], // sawmill
        107 => [33, 106, 137], // cobalt ore
        108 => [91, 169, 169], // mythril ore
        109 => [78, 193, 227], // hallowed grass
        110 | 113 => [134, 214, 247], // hallowed plants
        111 => [128, 26, 52],  // adamantite ore
        112 => [62, 45, 75],   // ebonsand
        114 => [191, 142, 111], // tinkerer's workshop
        115 => [134, 214, 247], // hallowed vines
        116 => [213, 229, 237], // pearlsand
        117 => [181, 172, 190], // pearlstone
        118 => [181, 172, 190], // pearlstone brick
        119 => [107, 92, 108], // iridescent brick
        120 => [92, 68, 73],   // mudstone brick
        121 => [11, 80, 143],  // cobalt brick
        122 => [91, 169, 169], // mythril brick
        123 => [106, 107, 118], // silt
        124 => [168, 121, 87], // wooden beam
        125 => [174, 195, 215], // crystal ball
        126 => [129, 125, 93], // disco ball
        127 => [144, 195, 232], // ice block
        128 => [191, 142, 111], // mannequin
        129 => [255, 117, 224], // crystal shard
        130 => [160, 160, 160], // active stone
        131 => [52, 52, 52],   // inactive stone
        132 | 411 => [144, 148, 144], // lever, pressure plates
        133 => [231, 53, 56],  // adamantite forge
        134 => [166, 187, 153], // mythril anvil
        135 | 136 => [144, 148, 144], // switches, traps
        137 => [140, 130, 116], // dart trap
        138 => [120, 120, 120], // boulder
        139 => [191, 142, 111], // music box
        140 => [98, 95, 167],  // demonite brick
        141 => [192, 59, 59],  // explosives
        142 | 143 => [144, 148, 144], // pumps
        144 => [153, 107, 97], // timer
        145 => [192, 30, 30],  // candy cane block
        146 => [43, 192, 30],  // green candy cane
        147 => [211, 236, 241], // snow
        148 => [181, 211, 217], // snow brick
        149 => [220, 50, 50],  // holiday lights
        151 => [191, 142, 111], // boreal wood
        153..=156 => [106, 107, 118], // sandstone/slush variants
        158 => [73, 51, 36],   // rich mahogany
        159 => [148, 133, 98], // ebonwood
        160 => [200, 40, 190], // rainbow brick
        161 => [144, 195, 232], // ice block
        162 => [183, 216, 240], // thin ice
        163 => [198, 188, 222], // purple ice
        164 => [236, 190, 212], // pink ice
        166 => [145, 133, 106], // tin ore
        167 => [62, 82, 114],  // lead ore
        168 => [131, 158, 129], // tungsten ore
        169 => [84, 93, 95],   // platinum ore
        170 => [139, 175, 85], // pine tree block
        171 => [22, 123, 62],  // christmas tree
        175 => [129, 125, 93], // tin brick
        176 => [62, 82, 114],  // lead brick
        177 => [131, 158, 129], // tungsten brick
        178 => [190, 39, 64],  // gem hooks
        179..=184 => [98, 124, 78], // moss variants
        185..=187 => [144, 148, 144], // small debris piles
        188 => [73, 120, 17],  // cactus block
        189 => [223, 255, 255], // cloud
        190 => [182, 175, 130], // glowing mushroom block
        191 => [168, 121, 87], // living wood
        192 => [23, 177, 76],  // leaf block
        193 => [129, 125, 93], // slime block
        194 => [92, 68, 73],   // bone block
        195 => [92, 68, 73],   // flesh block
        196 => [174, 168, 186], // rain cloud
        197 => [144, 195, 232], // frozen slime
        198 => [34, 29, 35],   // asphalt
        199 => [183, 69, 68],  // crimson grass
        200 => [225, 128, 206], // red ice
        201 => [183, 69, 68],  // crimson plants
        202 => [144, 195, 232], // sunplate
        203 => [201, 49, 47],  // crimstone
        204 => [213, 68, 68],  // crimtane ore
        205 => [183, 69, 68],  // crimson vines
        206 => [144, 195, 232], // ice brick
        208 => [213, 229, 237], // howling bones? keep neutral
        210 => [192, 59, 59],  // land mine
        211 => [97, 200, 45],  // chlorophyte ore
        221 => [235, 166, 135], // palladium ore
        222 => [197, 97, 200], // orichalcum ore
        223 => [103, 122, 126], // titanium ore
        224 => [106, 107, 118], // slush
        225 => [255, 170, 60], // hive
        226 => [131, 79, 13],  // lihzahrd brick
        227 => [27, 197, 109], // dye plants
        229 => [255, 170, 60], // honey block
        230 => [211, 175, 67], // crispy honey
        232 => [142, 107, 68], // wooden spikes
        233 => [143, 215, 29], // jungle flora
        234 => [121, 110, 97], // crimsand
        235..=237 => [253, 221, 3], // altars of the sun
        239 => [144, 148, 144], // metal bars
        240..=242 => [191, 142, 111], // paintings
        243 => [144, 148, 144], // imbuing station
        244 => [144, 148, 144], // bubble machine
        248 => [131, 79, 13],  // lihzahrd tiles
        249 => [107, 92, 108], // spooky wood? keep
        250 => [129, 129, 129], // gray stucco etc
        251 => [211, 175, 67], // yellow stucco
        252 => [149, 51, 52],  // red stucco
        253 => [54, 83, 72],   // green stucco
        254 => [128, 128, 128], // blue stucco? neutral
        255..=261 => [154, 40, 188], // gem caves
        262..=268 => [154, 40, 188], // large gems
        272 => [190, 171, 94], // marble? sandstone slab
        273 => [128, 128, 128], // stone slab
        274 => [148, 133, 98], // sandstone slab
        311 => [93, 62, 38],   // dynasty wood
        312 => [198, 78, 87],  // red dynasty shingles
        313 => [59, 86, 134],  // blue dynasty shingles
        314 => [144, 148, 144], // minecart track
        315 => [142, 66, 66],  // crimtane brick
        321 => [148, 133, 98], // ebonwood plank
        322 => [244, 220, 153], // shadewood? palm wood
        325 => [144, 195, 232], // glass block
        326 => [61, 68, 167],  // blue team block
        327 => [179, 54, 54],  // red team block
        328 => [143, 215, 29], // green team block
        330 => [150, 67, 22],  // copper plating
        331 => [185, 194, 195], // silver plating
        332 => [185, 164, 23], // gold plating
        336 => [253, 221, 3],  // living fire block
        345 => [255, 183, 38], // living cursed fire
        346 => [144, 195, 232], // living frost fire
        347 => [183, 69, 68],  // living ichor
        348 => [141, 137, 223], // living demon fire
        350 => [119, 105, 79], // martian conduit plating
        353 => [23, 177, 76],  // vine rope
        355 | 356 => [191, 142, 111], // bewitching table, ancient manipulator
        357 => [129, 125, 93], // smooth marble? granite
        366 => [255, 218, 56], // sandfall? desert fossil
        367 => [190, 171, 94], // marble block
        368 => [75, 74, 83],   // granite block
        369 => [128, 128, 128], // smooth granite
        370 => [255, 218, 56], // desert fossil
        379 => [129, 125, 93], // target dummy base
        380 => [191, 142, 111], // planter boxes
        381 => [255, 96, 0],   // lava moss stone
        382 => [23, 177, 76],  // flower vines
        383 => [93, 62, 38],   // living mahogany
        384 => [103, 189, 13], // mahogany leaves
        385 => [186, 50, 170], // crystal block
        386..=389 => [191, 142, 111], // trap doors, tall gates
        390 => [128, 128, 128], // lava lamp? stone accents
        396 => [190, 171, 94], // sandstone
        397 => [198, 177, 109], // hardened sand
        398 => [148, 112, 73], // hardened ebonsand? corrupt hardened
        399 => [109, 90, 128], // corrupt hardened sand
        400 => [148, 82, 82],  // crimson hardened sand
        401 => [121, 110, 97], // crimson sandstone
        402 => [134, 114, 160], // ebonsandstone
        403 => [161, 120, 120], // crimsandstone
        404 => [198, 177, 109], // desert fossil block
        407 => [255, 218, 136], // sturdy fossil
        408 => [80, 80, 80],   // luminite brick
        409 => [91, 255, 255], // luminite
        415..=418 => [253, 221, 3], // tall torches
        419 => [144, 148, 144], // logic gate lamps
        _ => return None,
    };
    Some(rgb)
}

/// Map color for a wall id; 0 means no wall and never reaches this table.
pub fn wall_color(id: u16) -> Option<Rgb> {
    let rgb = match id {
        1 | 5 => [52, 52, 52],   // stone / gray brick
        2 | 16 => [88, 61, 46],  // dirt
        3 => [61, 58, 78],       // ebonstone
        4 => [73, 51, 36],       // wood
        6 => [91, 30, 30],       // red brick
        7 | 17 => [27, 31, 42],  // blue dungeon
        8 | 18 => [31, 39, 26],  // green dungeon
        9 | 19 => [41, 28, 36],  // pink dungeon
        10 => [74, 62, 12],      // gold brick
        11 => [74, 77, 60],      // silver brick
        12 => [60, 26, 19],      // copper brick
        13 => [47, 23, 25],      // hellstone brick
        14 => [28, 24, 35],      // obsidian brick
        15 => [52, 43, 45],      // mud
        20 => [30, 80, 48],      // green candy cane
        21 => [57, 65, 68],      // glass (barely visible)
        22 => [73, 51, 36],      // demonite brick
        23 => [48, 57, 47],      // corruption grass
        24 => [69, 67, 41],      // flesh brick
        25 => [51, 51, 70],      // mythril brick
        26 => [87, 59, 55],      // rain cloud? iridescent
        27 => [69, 67, 41],      // wooden planks
        28 => [57, 46, 56],      // pearlstone brick
        29 => [20, 46, 104],     // cobalt brick
        30 => [57, 56, 41],      // mythril plating
        31 => [49, 51, 61],      // silt
        32 => [89, 26, 27],      // crimstone
        33 => [36, 29, 24],      // rich mahogany
        34..=36 => [60, 54, 72], // gem walls
        39 => [86, 17, 40],      // crimson grass
        40 => [49, 47, 83],      // hallowed grass? cave walls
        41 => [51, 51, 70],      // obsidian back
        42 => [87, 59, 55],      // tin
        43 => [34, 38, 51],      // lead
        44 => [58, 69, 57],      // tungsten
        45 => [41, 45, 46],      // platinum
        54..=59 => [40, 34, 31], // natural dirt variants
        60 => [65, 82, 22],      // living leaf
        61..=62 => [49, 51, 61], // cave variants
        63..=68 => [43, 56, 31], // grass walls
        69 => [41, 28, 36],      // spider nest
        70 => [78, 105, 135],    // hallowed cave
        71 => [51, 71, 82],      // ice
        72..=74 => [40, 34, 31], // cave dirt
        75 => [68, 17, 41],      // lihzahrd brick
        76 => [35, 40, 50],      // hive? blue slab
        77 => [38, 17, 5],       // hive
        78 => [65, 52, 38],      // palm wood
        79 => [49, 27, 16],      // ebonwood
        80 => [55, 39, 26],      // mahogany? shadewood
        81 => [89, 26, 27],      // crimstone brick
        83 => [46, 56, 59],      // hardened sand
        84 => [66, 61, 38],      // ebonsand wall
        85 => [60, 54, 72],      // titanstone
        86 => [30, 80, 48],      // boreal wood
        87 => [78, 105, 135],    // frozen slime? sail
        88..=93 => [49, 51, 61], // generic crafted walls
        94..=105 => [40, 34, 31], // natural sand/sandstone walls
        106 => [34, 29, 35],     // smooth marble
        107 => [78, 74, 69],     // granite
        108 => [48, 44, 40],     // smooth granite
        109..=113 => [46, 56, 59], // desert fossil walls
        114 => [41, 45, 46],     // luminite brick
        _ => return None,
    };
    Some(rgb)
}

/// Liquid colors; the table is total over the enumeration, with water as
/// the catch-all shade for anything unexpected.
pub fn liquid_color(kind: LiquidKind) -> Rgb {
    match kind {
        LiquidKind::Water => [9, 61, 191],
        LiquidKind::Lava => [253, 32, 3],
        LiquidKind::Honey => [255, 156, 12],
        LiquidKind::Shimmer => [215, 130, 255],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_table_covers_basics() {
        assert_eq!(block_color(0), Some([151, 107, 75]));
        assert_eq!(block_color(1), Some([128, 128, 128]));
        assert_eq!(block_color(MAX_STATIC_BLOCK_ID), Some([144, 148, 144]));
    }

    #[test]
    fn test_gaps_inside_static_range() {
        // 150 has no entry; callers substitute the sentinel.
        assert_eq!(block_color(150), None);
        assert_eq!(wall_color(200), None);
    }

    #[test]
    fn test_fallback_palette_is_deterministic() {
        let idx = 999 % FALLBACK_PALETTE.len();
        assert_eq!(FALLBACK_PALETTE[idx], FALLBACK_PALETTE[999 % FALLBACK_PALETTE.len()]);
    }
}
