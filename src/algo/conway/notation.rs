//! Parsing Conway notation strings such as `"tkC"`.

use std::fmt;

use crate::algo::{Modifier, Pipeline};
use crate::error::{MeshError, Result};
use crate::mesh::Mesh;
use crate::primitives;

use super::{Ambo, AmboKisDual, Dual, Expand, Join, Kis, Needle, Ortho, Truncate, Zip};

/// A single operator letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConwayOp {
    /// `d`
    Dual,
    /// `k`
    Kis,
    /// `a`
    Ambo,
    /// `t`
    Truncate,
    /// `z`
    Zip,
    /// `j`
    Join,
    /// `n`
    Needle,
    /// `e`
    Expand,
    /// `o`
    Ortho,
    /// `x`, shorthand for ambo, dual, kis
    AmboKisDual,
}

impl ConwayOp {
    /// Look up an operator by its letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'd' => Self::Dual,
            'k' => Self::Kis,
            'a' => Self::Ambo,
            't' => Self::Truncate,
            'z' => Self::Zip,
            'j' => Self::Join,
            'n' => Self::Needle,
            'e' => Self::Expand,
            'o' => Self::Ortho,
            'x' => Self::AmboKisDual,
            _ => return None,
        })
    }

    /// The letter of this operator.
    pub fn letter(self) -> char {
        match self {
            Self::Dual => 'd',
            Self::Kis => 'k',
            Self::Ambo => 'a',
            Self::Truncate => 't',
            Self::Zip => 'z',
            Self::Join => 'j',
            Self::Needle => 'n',
            Self::Expand => 'e',
            Self::Ortho => 'o',
            Self::AmboKisDual => 'x',
        }
    }

    /// The modifier implementing this operator.
    pub fn modifier(self) -> Box<dyn Modifier> {
        match self {
            Self::Dual => Box::new(Dual),
            Self::Kis => Box::new(Kis),
            Self::Ambo => Box::new(Ambo),
            Self::Truncate => Box::new(Truncate),
            Self::Zip => Box::new(Zip),
            Self::Join => Box::new(Join),
            Self::Needle => Box::new(Needle),
            Self::Expand => Box::new(Expand),
            Self::Ortho => Box::new(Ortho),
            Self::AmboKisDual => Box::new(AmboKisDual),
        }
    }
}

/// A seed solid, written as an uppercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// `T`
    Tetrahedron,
    /// `C`
    Cube,
    /// `O`
    Octahedron,
    /// `I`
    Icosahedron,
    /// `D`
    Dodecahedron,
}

impl Seed {
    /// Look up a seed by its letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'T' => Self::Tetrahedron,
            'C' => Self::Cube,
            'O' => Self::Octahedron,
            'I' => Self::Icosahedron,
            'D' => Self::Dodecahedron,
            _ => return None,
        })
    }

    /// The letter of this seed.
    pub fn letter(self) -> char {
        match self {
            Self::Tetrahedron => 'T',
            Self::Cube => 'C',
            Self::Octahedron => 'O',
            Self::Icosahedron => 'I',
            Self::Dodecahedron => 'D',
        }
    }

    /// Generate the seed with unit circumradius.
    pub fn mesh(self) -> Mesh {
        match self {
            Self::Tetrahedron => primitives::tetrahedron(1.0),
            Self::Cube => primitives::cube(2.0 / 3f64.sqrt()),
            Self::Octahedron => primitives::octahedron(1.0),
            Self::Icosahedron => primitives::icosahedron(1.0),
            Self::Dodecahedron => primitives::dodecahedron(1.0),
        }
    }
}

/// A parsed notation string: operators and an optional seed.
///
/// Operators are written left to right but applied right to left, so
/// `"tkC"` means kis the cube, then truncate the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConwayNotation {
    /// Operators in written order.
    ops: Vec<ConwayOp>,
    seed: Option<Seed>,
}

impl ConwayNotation {
    /// Parse a notation string.
    ///
    /// Whitespace is ignored. A seed letter may only appear last.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] for an empty string, an
    /// unknown letter or a seed that is not the final letter.
    pub fn parse(notation: &str) -> Result<Self> {
        let letters: Vec<char> = notation.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.is_empty() {
            return Err(MeshError::invalid_param("notation", notation, "is empty"));
        }

        let mut ops = Vec::with_capacity(letters.len());
        let mut seed = None;
        for (i, &letter) in letters.iter().enumerate() {
            if let Some(op) = ConwayOp::from_letter(letter) {
                ops.push(op);
            } else if let Some(s) = Seed::from_letter(letter) {
                if i + 1 != letters.len() {
                    return Err(MeshError::invalid_param(
                        "notation",
                        notation,
                        "seed letter must come last",
                    ));
                }
                seed = Some(s);
            } else {
                return Err(MeshError::invalid_param("notation", notation, "unknown operator letter"));
            }
        }

        Ok(Self { ops, seed })
    }

    /// Operators in written order (the last one is applied first).
    pub fn ops(&self) -> &[ConwayOp] {
        &self.ops
    }

    /// The seed, if the notation names one.
    pub fn seed(&self) -> Option<Seed> {
        self.seed
    }

    /// The operators as a pipeline in application order.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        for op in self.ops.iter().rev() {
            pipeline.push(op.modifier());
        }
        pipeline
    }

    /// Generate the seed and apply every operator to it.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if the notation has no seed.
    pub fn build(&self) -> Result<Mesh> {
        let seed = self
            .seed
            .ok_or_else(|| MeshError::invalid_param("notation", self, "has no seed letter"))?;
        let mut mesh = seed.mesh();
        self.pipeline().modify(&mut mesh)?;
        log::debug!(
            "conway {}: {} vertices, {} faces",
            self,
            mesh.num_vertices(),
            mesh.num_faces()
        );
        Ok(mesh)
    }
}

impl fmt::Display for ConwayNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op.letter())?;
        }
        if let Some(seed) = self.seed {
            write!(f, "{}", seed.letter())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ConwayNotation {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
