//! Cube face identifiers and the face-to-direction orientation table.
//!
//! Face-local coordinates (u, v) run over [-1, 1] with u growing rightward
//! and v growing downward on the face image. `orient` maps them onto a cube
//! of half-extent 1 centered at the origin. The six formulas share one up
//! convention, so neighbouring face edges evaluate to identical directions
//! and the assembled skybox is seamless (see the seam tests below).

use std::str::FromStr;

use glam::Vec3;

use crate::convert::ConvertError;

/// One cube map face, in canonical output order rt, lf, ft, bk, up, dn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Right,
    Left,
    Front,
    Back,
    Up,
    Down,
}

impl Face {
    /// All six faces in canonical order.
    pub fn all() -> &'static [Face] {
        &[
            Face::Right,
            Face::Left,
            Face::Front,
            Face::Back,
            Face::Up,
            Face::Down,
        ]
    }

    /// Position within the canonical order.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Face::Right => 0,
            Face::Left => 1,
            Face::Front => 2,
            Face::Back => 3,
            Face::Up => 4,
            Face::Down => 5,
        }
    }

    /// Two-letter suffix used in output file names and the shader template.
    pub fn suffix(&self) -> &'static str {
        match self {
            Face::Right => "rt",
            Face::Left => "lf",
            Face::Front => "ft",
            Face::Back => "bk",
            Face::Up => "up",
            Face::Down => "dn",
        }
    }

    /// Direction to the point (u, v) of this face on the half-extent-1 cube.
    ///
    /// The six sign/axis assignments are a fixed contract shared with every
    /// consumer of the output faces; do not "simplify" them.
    #[inline]
    pub fn orient(&self, u: f32, v: f32) -> Vec3 {
        match self {
            Face::Right => Vec3::new(-1.0, -u, -v),
            Face::Left => Vec3::new(1.0, u, -v),
            Face::Front => Vec3::new(u, -1.0, -v),
            Face::Back => Vec3::new(-u, 1.0, -v),
            Face::Up => Vec3::new(-v, -u, 1.0),
            Face::Down => Vec3::new(v, -u, -1.0),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl FromStr for Face {
    type Err = ConvertError;

    /// Accepts both the two-letter wire id and the long name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rt" | "right" => Ok(Face::Right),
            "lf" | "left" => Ok(Face::Left),
            "ft" | "front" => Ok(Face::Front),
            "bk" | "back" => Ok(Face::Back),
            "up" => Ok(Face::Up),
            "dn" | "down" => Ok(Face::Down),
            other => Err(ConvertError::UnknownFace(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let all = Face::all();
        assert_eq!(all.len(), 6);
        let suffixes: Vec<&str> = all.iter().map(|f| f.suffix()).collect();
        assert_eq!(suffixes, vec!["rt", "lf", "ft", "bk", "up", "dn"]);
        for (i, face) in all.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn test_orient_formulas() {
        assert_eq!(Face::Right.orient(0.5, -0.25), Vec3::new(-1.0, -0.5, 0.25));
        assert_eq!(Face::Left.orient(0.5, -0.25), Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(Face::Front.orient(0.5, -0.25), Vec3::new(0.5, -1.0, 0.25));
        assert_eq!(Face::Back.orient(0.5, -0.25), Vec3::new(-0.5, 1.0, 0.25));
        assert_eq!(Face::Up.orient(0.5, -0.25), Vec3::new(0.25, -0.5, 1.0));
        assert_eq!(Face::Down.orient(0.5, -0.25), Vec3::new(-0.25, -0.5, -1.0));
    }

    #[test]
    fn test_face_centers_point_along_axes() {
        assert_eq!(Face::Right.orient(0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(Face::Left.orient(0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(Face::Front.orient(0.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(Face::Back.orient(0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(Face::Up.orient(0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(Face::Down.orient(0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
    }

    /// Test: side ring seams
    /// Validates: each face's right edge equals its neighbour's left edge
    #[test]
    fn test_side_ring_edges_are_shared() {
        let pairs = [
            (Face::Front, Face::Left),
            (Face::Left, Face::Back),
            (Face::Back, Face::Right),
            (Face::Right, Face::Front),
        ];
        for (a, b) in pairs {
            for step in 0..=8 {
                let v = step as f32 / 4.0 - 1.0;
                assert_eq!(
                    a.orient(1.0, v),
                    b.orient(-1.0, v),
                    "edge mismatch between {} and {}",
                    a,
                    b
                );
            }
        }
    }

    /// Test: cap seams
    /// Validates: up/down rows meet the right face's top/bottom rows
    #[test]
    fn test_cap_edges_are_shared() {
        for step in 0..=8 {
            let u = step as f32 / 4.0 - 1.0;
            assert_eq!(Face::Up.orient(u, 1.0), Face::Right.orient(u, -1.0));
            assert_eq!(Face::Down.orient(u, -1.0), Face::Right.orient(u, 1.0));
        }
    }

    #[test]
    fn test_parse_face_names() {
        assert_eq!("rt".parse::<Face>().unwrap(), Face::Right);
        assert_eq!("front".parse::<Face>().unwrap(), Face::Front);
        assert_eq!("UP".parse::<Face>().unwrap(), Face::Up);
        assert_eq!(" dn ".parse::<Face>().unwrap(), Face::Down);
        assert!(matches!(
            "diagonal".parse::<Face>(),
            Err(ConvertError::UnknownFace(name)) if name == "diagonal"
        ));
    }
}
