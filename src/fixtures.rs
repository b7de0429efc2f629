//! Synthetic world-file builder for tests: assembles a byte-exact minimal
//! save (preamble, header section, tile section, patched pointer table) so
//! every decode pass can be exercised without a fixture file on disk.

pub struct WorldBuilder {
    version: i32,
    width: i32,
    height: i32,
    name: String,
    surface: f64,
    rock: f64,
    expert: bool,
    important: Vec<bool>,
    angler_count: i32,
    tiles: Option<TileSection>,
}

impl WorldBuilder {
    pub fn new(version: i32, width: i32, height: i32) -> Self {
        Self {
            version,
            width,
            height,
            name: "Fixture".into(),
            surface: 10.0,
            rock: 20.0,
            expert: false,
            important: Vec::new(),
            angler_count: 0,
            tiles: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn surface(mut self, surface: f64) -> Self {
        self.surface = surface;
        self
    }

    pub fn rock(mut self, rock: f64) -> Self {
        self.rock = rock;
        self
    }

    pub fn expert(mut self, expert: bool) -> Self {
        self.expert = expert;
        self
    }

    pub fn important(mut self, important: Vec<bool>) -> Self {
        self.important = important;
        self
    }

    /// Declared angler-list length; the builder never writes the entries,
    /// so anything nonzero yields a deliberately lying header.
    pub fn angler_count(mut self, count: i32) -> Self {
        self.angler_count = count;
        self
    }

    pub fn tiles(mut self, tiles: TileSection) -> Self {
        self.tiles = Some(tiles);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_i32(&mut out, self.version);
        out.extend_from_slice(b"relogic");
        out.push(2); // world-save tag
        out.extend_from_slice(&[0u8; 12]); // revision + favorite

        put_u16(&mut out, 3);
        let pointer_pos = out.len();
        out.extend_from_slice(&[0u8; 12]); // three pointers, patched below

        put_u16(&mut out, self.important.len() as u16);
        let mut bits = vec![0u8; self.important.len().div_ceil(8)];
        for (i, &flag) in self.important.iter().enumerate() {
            if flag {
                bits[i / 8] |= 1 << (i % 8);
            }
        }
        out.extend_from_slice(&bits);

        let header_off = out.len() as u32;
        self.write_header(&mut out);
        let tiles_off = out.len() as u32;
        match &self.tiles {
            Some(section) => out.extend_from_slice(&section.bytes),
            None => self.write_empty_tiles(&mut out),
        }
        let end_off = out.len() as u32;

        out[pointer_pos..pointer_pos + 4].copy_from_slice(&header_off.to_le_bytes());
        out[pointer_pos + 4..pointer_pos + 8].copy_from_slice(&tiles_off.to_le_bytes());
        out[pointer_pos + 8..pointer_pos + 12].copy_from_slice(&end_off.to_le_bytes());
        out
    }

    /// Header fields in decode order, with the same version gates the
    /// decoder applies.
    fn write_header(&self, out: &mut Vec<u8>) {
        let v = self.version;
        put_string(out, &self.name);
        put_string(out, "1234"); // seed
        put_u64(out, 1); // worldgen version
        out.extend_from_slice(&[0u8; 16]); // guid
        put_i32(out, 1); // world id
        put_i32(out, 0);
        put_i32(out, self.width * 16);
        put_i32(out, 0);
        put_i32(out, self.height * 16);
        put_i32(out, self.height);
        put_i32(out, self.width);

        if v >= 209 {
            put_i32(out, 0); // classic
            for gate in [222, 227, 238, 239, 241, 249, 266, 267] {
                if v >= gate {
                    out.push(0);
                }
            }
        } else {
            out.push(self.expert as u8);
        }

        put_i64(out, 0); // creation time
        out.push(0); // moon type
        for _ in 0..3 {
            put_i32(out, self.width); // tree_x
        }
        for _ in 0..4 {
            put_i32(out, 0); // tree styles
        }
        for _ in 0..3 {
            put_i32(out, self.width); // cave back x
        }
        for _ in 0..4 {
            put_i32(out, 0); // cave back styles
        }
        put_i32(out, 0); // ice back style
        put_i32(out, 0); // jungle back style
        put_i32(out, 0); // hell back style
        put_i32(out, self.width / 2); // spawn x
        put_i32(out, 0); // spawn y
        put_f64(out, self.surface);
        put_f64(out, self.rock);
        put_f64(out, 13500.0); // time
        out.push(1); // day time
        put_i32(out, 0); // moon phase
        out.push(0); // blood moon
        out.push(0); // eclipse
        put_i32(out, 0); // dungeon x
        put_i32(out, 0); // dungeon y
        out.push(0); // crimson
        out.extend_from_slice(&[0u8; 18]); // boss/NPC progression booleans
        out.push(0); // shadow orb smashed
        out.push(0); // meteor spawned
        out.push(0); // shadow orb count
        put_i32(out, 0); // altar count
        out.push(0); // hard mode
        if v >= 257 {
            out.push(0); // after party of doom
        }
        put_i32(out, 0); // invasion delay
        put_i32(out, 0); // invasion size
        put_i32(out, 0); // invasion type
        put_f64(out, 0.0); // invasion x
        put_f64(out, 0.0); // slime rain time
        out.push(0); // sundial cooldown
        out.push(0); // raining
        put_i32(out, 0); // rain time
        put_f32(out, 0.0); // max rain
        put_i32(out, 0); // ore tier 1
        put_i32(out, 0); // ore tier 2
        put_i32(out, 0); // ore tier 3
        out.extend_from_slice(&[0u8; 8]); // background styles
        put_i32(out, 0); // cloud bg
        put_i16(out, 0); // num clouds
        put_f32(out, 0.0); // wind speed
        put_i32(out, self.angler_count); // anglers finished today
        out.push(0); // saved angler
        put_i32(out, 0); // angler quest
        out.push(0); // saved stylist
        out.push(0); // saved tax collector
        if v >= 201 {
            out.push(0); // saved golfer
        }
        put_i32(out, 0); // invasion size start
        put_i32(out, 0); // cultist delay
        put_i16(out, 0); // kill counts
        out.push(0); // fast forward time
        out.extend_from_slice(&[0u8; 9]); // fishron..christmas tree
        out.extend_from_slice(&[0u8; 9]); // towers + lunar apocalypse
        out.push(0); // party manual
        out.push(0); // party genuine
        put_i32(out, 0); // party cooldown
        put_i32(out, 0); // partying npcs
        out.push(0); // sandstorm happening
        put_i32(out, 0); // sandstorm time left
        put_f32(out, 0.0); // sandstorm severity
        put_f32(out, 0.0); // sandstorm intended severity
        out.push(0); // saved bartender
        out.extend_from_slice(&[0u8; 3]); // old one's army tiers
        out.push(0); // mushroom bg style
        if v >= 204 {
            out.push(0); // combat book used
        }
        if v >= 207 {
            put_i32(out, 0); // lantern night cooldown
            out.extend_from_slice(&[0u8; 3]); // genuine, manual, next night
        }
        if v >= 211 {
            put_i32(out, 2); // tree top styles
            put_i32(out, 0);
            put_i32(out, 0);
            out.push(0); // force halloween
            out.push(0); // force christmas
        }
    }

    /// One maximal-run record per column of empty tiles.
    fn write_empty_tiles(&self, out: &mut Vec<u8>) {
        for _ in 0..self.width {
            if self.height > 1 {
                out.push(0x80);
                put_i16(out, (self.height - 1) as i16);
            } else {
                out.push(0x00);
            }
        }
    }
}

/// Raw tile-section bytes with helpers for the common record shapes.
#[derive(Default)]
pub struct TileSection {
    bytes: Vec<u8>,
}

pub fn tile_section() -> TileSection {
    TileSection::default()
}

impl TileSection {
    pub fn push_empty_run(&mut self, run: u8) {
        self.bytes.extend_from_slice(&[0x40, run]);
    }

    pub fn push_block(&mut self, id: u8) {
        self.bytes.extend_from_slice(&[0x02, id]);
    }

    pub fn push_block_run(&mut self, id: u8, run: u8) {
        self.bytes.extend_from_slice(&[0x42, id, run]);
    }

    pub fn push_liquid_run(&mut self, kind_bits: u8, amount: u8, run: u8) {
        self.bytes.extend_from_slice(&[0x40 | kind_bits << 3, amount, run]);
    }
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_i64(out: &mut Vec<u8>, v: i64) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_f64(out: &mut Vec<u8>, v: f64) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_string(out: &mut Vec<u8>, s: &str) {
    assert!(s.len() < 128, "fixture strings stay under one varint byte");
    out.push(s.len() as u8);
    out.extend_from_slice(s.as_bytes());
}
