use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::params::error::ParamError;

/// A color exactly as the user wrote it, before range checks.
///
/// Text forms are a CSS/X11 color name or a `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` literal.
/// Tuple forms are exactly four integers; range checks happen in [`ColorSpec::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Text(String),
    Channels([i64; 4]),
}

impl ColorSpec {
    /// Parse the command-line form: a name, a hex literal, or `r,g,b,a` optionally wrapped in
    /// parentheses. Anything with a comma must be exactly four integers.
    pub fn parse(field: &'static str, input: &str) -> Result<Self, ParamError> {
        let malformed = || ParamError::MalformedColor {
            field,
            value: input.to_owned(),
        };

        let s = input.trim();
        if s.is_empty() {
            return Err(malformed());
        }

        let inner = strip_parens(s);
        if !inner.contains(',') {
            if inner.len() != s.len() {
                // "(red)" is neither a name nor a tuple.
                return Err(malformed());
            }
            return Ok(Self::Text(s.to_owned()));
        }

        let parts = inner.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != 4 {
            return Err(malformed());
        }
        let mut channels = [0i64; 4];
        for (slot, part) in channels.iter_mut().zip(parts) {
            *slot = part.parse::<i64>().map_err(|_| malformed())?;
        }
        Ok(Self::Channels(channels))
    }

    /// Check ranges and look up names.
    pub fn resolve(&self, field: &'static str) -> Result<Rgba8, ParamError> {
        match self {
            Self::Channels(ch) => {
                let conv = |v: i64| u8::try_from(v).ok();
                match (conv(ch[0]), conv(ch[1]), conv(ch[2]), conv(ch[3])) {
                    (Some(r), Some(g), Some(b), Some(a)) => Ok(Rgba8::new(r, g, b, a)),
                    _ => Err(ParamError::ChannelOutOfRange {
                        field,
                        channels: *ch,
                    }),
                }
            }
            Self::Text(text) => {
                let t = text.trim();
                if let Some(hex) = t.strip_prefix('#') {
                    return parse_hex(hex).ok_or_else(|| ParamError::MalformedColor {
                        field,
                        value: text.clone(),
                    });
                }
                let name = t.to_ascii_lowercase();
                named_color(&name).ok_or(ParamError::UnknownColorName { field, name })
            }
        }
    }
}

impl From<Rgba8> for ColorSpec {
    fn from(c: Rgba8) -> Self {
        Self::Channels([c.r, c.g, c.b, c.a].map(i64::from))
    }
}

impl<'de> Deserialize<'de> for ColorSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Arr(Vec<i64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse("color", &s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => {
                let channels: [i64; 4] = v.try_into().map_err(|v: Vec<i64>| {
                    serde::de::Error::custom(format!(
                        "rgba array must have exactly 4 integers (got {})",
                        v.len()
                    ))
                })?;
                Ok(Self::Channels(channels))
            }
        }
    }
}

pub(crate) fn strip_parens(s: &str) -> &str {
    s.strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(s)
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        4 => Some(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba8> {
    if name == "transparent" {
        return Some(Rgba8::new(0, 0, 0, 0));
    }
    let rgb: u32 = match name {
        "aliceblue" => 0xf0f8ff,
        "antiquewhite" => 0xfaebd7,
        "aqua" | "cyan" => 0x00ffff,
        "aquamarine" => 0x7fffd4,
        "azure" => 0xf0ffff,
        "beige" => 0xf5f5dc,
        "bisque" => 0xffe4c4,
        "black" => 0x000000,
        "blanchedalmond" => 0xffebcd,
        "blue" => 0x0000ff,
        "blueviolet" => 0x8a2be2,
        "brown" => 0xa52a2a,
        "burlywood" => 0xdeb887,
        "cadetblue" => 0x5f9ea0,
        "chartreuse" => 0x7fff00,
        "chocolate" => 0xd2691e,
        "coral" => 0xff7f50,
        "cornflowerblue" => 0x6495ed,
        "cornsilk" => 0xfff8dc,
        "crimson" => 0xdc143c,
        "darkblue" => 0x00008b,
        "darkcyan" => 0x008b8b,
        "darkgoldenrod" => 0xb8860b,
        "darkgray" | "darkgrey" => 0xa9a9a9,
        "darkgreen" => 0x006400,
        "darkkhaki" => 0xbdb76b,
        "darkmagenta" => 0x8b008b,
        "darkolivegreen" => 0x556b2f,
        "darkorange" => 0xff8c00,
        "darkorchid" => 0x9932cc,
        "darkred" => 0x8b0000,
        "darksalmon" => 0xe9967a,
        "darkseagreen" => 0x8fbc8f,
        "darkslateblue" => 0x483d8b,
        "darkslategray" | "darkslategrey" => 0x2f4f4f,
        "darkturquoise" => 0x00ced1,
        "darkviolet" => 0x9400d3,
        "deeppink" => 0xff1493,
        "deepskyblue" => 0x00bfff,
        "dimgray" | "dimgrey" => 0x696969,
        "dodgerblue" => 0x1e90ff,
        "firebrick" => 0xb22222,
        "floralwhite" => 0xfffaf0,
        "forestgreen" => 0x228b22,
        "fuchsia" | "magenta" => 0xff00ff,
        "gainsboro" => 0xdcdcdc,
        "ghostwhite" => 0xf8f8ff,
        "gold" => 0xffd700,
        "goldenrod" => 0xdaa520,
        "gray" | "grey" => 0x808080,
        "green" => 0x008000,
        "greenyellow" => 0xadff2f,
        "honeydew" => 0xf0fff0,
        "hotpink" => 0xff69b4,
        "indianred" => 0xcd5c5c,
        "indigo" => 0x4b0082,
        "ivory" => 0xfffff0,
        "khaki" => 0xf0e68c,
        "lavender" => 0xe6e6fa,
        "lavenderblush" => 0xfff0f5,
        "lawngreen" => 0x7cfc00,
        "lemonchiffon" => 0xfffacd,
        "lightblue" => 0xadd8e6,
        "lightcoral" => 0xf08080,
        "lightcyan" => 0xe0ffff,
        "lightgoldenrodyellow" => 0xfafad2,
        "lightgray" | "lightgrey" => 0xd3d3d3,
        "lightgreen" => 0x90ee90,
        "lightpink" => 0xffb6c1,
        "lightsalmon" => 0xffa07a,
        "lightseagreen" => 0x20b2aa,
        "lightskyblue" => 0x87cefa,
        "lightslategray" | "lightslategrey" => 0x778899,
        "lightsteelblue" => 0xb0c4de,
        "lightyellow" => 0xffffe0,
        "lime" => 0x00ff00,
        "limegreen" => 0x32cd32,
        "linen" => 0xfaf0e6,
        "maroon" => 0x800000,
        "mediumaquamarine" => 0x66cdaa,
        "mediumblue" => 0x0000cd,
        "mediumorchid" => 0xba55d3,
        "mediumpurple" => 0x9370db,
        "mediumseagreen" => 0x3cb371,
        "mediumslateblue" => 0x7b68ee,
        "mediumspringgreen" => 0x00fa9a,
        "mediumturquoise" => 0x48d1cc,
        "mediumvioletred" => 0xc71585,
        "midnightblue" => 0x191970,
        "mintcream" => 0xf5fffa,
        "mistyrose" => 0xffe4e1,
        "moccasin" => 0xffe4b5,
        "navajowhite" => 0xffdead,
        "navy" => 0x000080,
        "oldlace" => 0xfdf5e6,
        "olive" => 0x808000,
        "olivedrab" => 0x6b8e23,
        "orange" => 0xffa500,
        "orangered" => 0xff4500,
        "orchid" => 0xda70d6,
        "palegoldenrod" => 0xeee8aa,
        "palegreen" => 0x98fb98,
        "paleturquoise" => 0xafeeee,
        "palevioletred" => 0xdb7093,
        "papayawhip" => 0xffefd5,
        "peachpuff" => 0xffdab9,
        "peru" => 0xcd853f,
        "pink" => 0xffc0cb,
        "plum" => 0xdda0dd,
        "powderblue" => 0xb0e0e6,
        "purple" => 0x800080,
        "rebeccapurple" => 0x663399,
        "red" => 0xff0000,
        "rosybrown" => 0xbc8f8f,
        "royalblue" => 0x4169e1,
        "saddlebrown" => 0x8b4513,
        "salmon" => 0xfa8072,
        "sandybrown" => 0xf4a460,
        "seagreen" => 0x2e8b57,
        "seashell" => 0xfff5ee,
        "sienna" => 0xa0522d,
        "silver" => 0xc0c0c0,
        "skyblue" => 0x87ceeb,
        "slateblue" => 0x6a5acd,
        "slategray" | "slategrey" => 0x708090,
        "snow" => 0xfffafa,
        "springgreen" => 0x00ff7f,
        "steelblue" => 0x4682b4,
        "tan" => 0xd2b48c,
        "teal" => 0x008080,
        "thistle" => 0xd8bfd8,
        "tomato" => 0xff6347,
        "turquoise" => 0x40e0d0,
        "violet" => 0xee82ee,
        "wheat" => 0xf5deb3,
        "white" => 0xffffff,
        "whitesmoke" => 0xf5f5f5,
        "yellow" => 0xffff00,
        "yellowgreen" => 0x9acd32,
        _ => return None,
    };
    let [_, r, g, b] = rgb.to_be_bytes();
    Some(Rgba8::new(r, g, b, 255))
}

#[cfg(test)]
#[path = "../../tests/unit/params/color.rs"]
mod tests;
