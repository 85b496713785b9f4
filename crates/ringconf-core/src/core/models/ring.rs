use super::atom::AtomRecord;
use super::conformation::Conformation;
use crate::core::geometry::plane::Plane;
use nalgebra::Point3;
use std::fmt;

/// The ring topologies the engine knows how to classify.
///
/// This tagged enum replaces a classic deep class hierarchy: each kind
/// carries its ring size, its default plane-search offsets and its ordered
/// conformation registry, and dispatches to the matching slot-name table
/// and classification cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingKind {
    Cyclopentane,
    Cyclohexane,
    Oxane,
    Pyrane,
    Benzene,
}

const FIVE_RING_REGISTRY: &[Conformation] = &[
    Conformation::Unanalysed,
    Conformation::Undefined,
    Conformation::Flat,
    Conformation::Envelope,
    Conformation::Twist,
];

const SIX_RING_REGISTRY: &[Conformation] = &[
    Conformation::Unanalysed,
    Conformation::Undefined,
    Conformation::Flat,
    Conformation::Chair,
    Conformation::TwistedBoat,
    Conformation::HalfChair,
    Conformation::Boat,
];

const OXYGEN_RING_REGISTRY: &[Conformation] = &[
    Conformation::Unanalysed,
    Conformation::Undefined,
    Conformation::Flat,
    Conformation::Chair,
    Conformation::Envelope,
    Conformation::HalfChair,
    Conformation::Boat,
    Conformation::Skew,
];

const BENZENE_REGISTRY: &[Conformation] = &[
    Conformation::Unanalysed,
    Conformation::Undefined,
    Conformation::Flat,
];

impl RingKind {
    /// Number of atoms in the ring.
    pub fn size(&self) -> usize {
        match self {
            RingKind::Cyclopentane => 5,
            _ => 6,
        }
    }

    /// Default relative offsets `(dist1, dist2, dist3)` for the best-fit
    /// plane search.
    pub fn plane_offsets(&self) -> (usize, usize, usize) {
        match self.size() {
            5 => (1, 2, 3),
            _ => (1, 3, 4),
        }
    }

    /// The ordered conformation registry of this ring kind.
    ///
    /// The position of a conformation within the registry is its stable
    /// numeric code for this kind; codes are not comparable across kinds.
    pub fn registry(&self) -> &'static [Conformation] {
        match self {
            RingKind::Cyclopentane => FIVE_RING_REGISTRY,
            RingKind::Cyclohexane => SIX_RING_REGISTRY,
            RingKind::Oxane | RingKind::Pyrane => OXYGEN_RING_REGISTRY,
            RingKind::Benzene => BENZENE_REGISTRY,
        }
    }

    /// The kind-local numeric code of `conformation`, or `None` if the
    /// conformation is not part of this kind's registry.
    pub fn code_of(&self, conformation: Conformation) -> Option<u8> {
        self.registry()
            .iter()
            .position(|c| *c == conformation)
            .map(|idx| idx as u8)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RingKind::Cyclopentane => "cyclopentane",
            RingKind::Cyclohexane => "cyclohexane",
            RingKind::Oxane => "oxane",
            RingKind::Pyrane => "pyrane",
            RingKind::Benzene => "benzene",
        }
    }
}

impl fmt::Display for RingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Annotation of one ring atom found out of the reference plane, used by
/// the oxygen-bearing six-ring kinds to build names such as "4C1".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfPlaneAtom {
    /// Position label in the normalized ring numbering ("1".."6" or "O").
    pub name: String,
    /// Whether the atom lies on the positive side of the chosen plane.
    pub above: bool,
}

/// The result of the best-fit plane search over all ring rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlaneFit {
    pub(crate) begin: usize,
    pub(crate) residual: f64,
    pub(crate) within_tolerance: bool,
}

/// One molecule's modeled ring: N atom slots, fit state and the resolved
/// conformation.
///
/// Lifecycle: constructed empty, filled exactly once from a batch of atom
/// records, analysed exactly once; the conformation is terminal afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RingInstance {
    pub(crate) kind: RingKind,
    pub(crate) structure: String,
    pub(crate) ligand: Option<String>,
    pub(crate) slots: Vec<Option<AtomRecord>>,
    pub(crate) begin: usize,
    pub(crate) has_plane: bool,
    pub(crate) filled: bool,
    pub(crate) analysed: bool,
    pub(crate) conformation: Conformation,
    pub(crate) out_of_plane: [Option<OutOfPlaneAtom>; 2],
    pub(crate) oxygen_slot: Option<usize>,
}

impl RingInstance {
    /// Creates an empty ring instance for a structure identified by
    /// `structure` (typically the source file name).
    pub fn new(kind: RingKind, structure: &str) -> Self {
        Self {
            kind,
            structure: structure.to_string(),
            ligand: None,
            slots: vec![None; kind.size()],
            begin: 0,
            has_plane: false,
            filled: false,
            analysed: false,
            conformation: Conformation::Unanalysed,
            out_of_plane: [None, None],
            oxygen_slot: None,
        }
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    /// The structure identifier this ring was read from, as given.
    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// The ligand (residue) name, once known from the first atom record.
    pub fn ligand(&self) -> Option<&str> {
        self.ligand.as_deref()
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn is_analysed(&self) -> bool {
        self.analysed
    }

    /// Whether the last plane search found a reference plane within
    /// tolerance.
    pub fn has_plane(&self) -> bool {
        self.has_plane
    }

    /// Rotation offset of the best reference plane; all ring-relative atom
    /// references of the classifiers are `(begin + k) mod N`.
    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn conformation(&self) -> Conformation {
        self.conformation
    }

    /// The kind-local numeric code of the resolved conformation.
    pub fn conformation_code(&self) -> u8 {
        // Every conformation the cascades assign is a member of the kind's
        // own registry.
        self.kind.code_of(self.conformation).unwrap_or(0)
    }

    /// The atom filled into `slot`, if any.
    pub fn atom(&self, slot: usize) -> Option<&AtomRecord> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Human-readable conformation name.
    ///
    /// For oxane and pyrane rings this is the annotated form listing the
    /// out-of-plane positions above the plane, the conformation symbol, and
    /// the positions below (e.g. "4C1", "OC3", "1,4B"); every other kind
    /// reports the plain registry label.
    pub fn describe_conformation(&self) -> String {
        let Some(symbol) = self.conformation.symbol() else {
            return self.conformation.label().to_string();
        };
        match self.kind {
            RingKind::Oxane | RingKind::Pyrane => {
                let mut name = String::new();
                let sides = [true, false];
                for (i, above) in sides.into_iter().enumerate() {
                    let mut first = true;
                    for atom in self.out_of_plane.iter().flatten() {
                        if atom.above == above {
                            if !first {
                                name.push(',');
                            }
                            name.push_str(&atom.name);
                            first = false;
                        }
                    }
                    if i == 0 {
                        name.push(symbol);
                    }
                }
                name
            }
            _ => self.conformation.label().to_string(),
        }
    }

    /// Copies of the filled slot coordinates, in slot order.
    ///
    /// Returns `None` while any slot is still empty.
    pub(crate) fn positions(&self) -> Option<Vec<Point3<f64>>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|atom| atom.position))
            .collect()
    }

    /// Best-fit reference plane search over all ring rotations.
    ///
    /// Iterates the rotation index over all N ring positions, builds the
    /// candidate plane from atoms `(i, i+d1, i+d2)` and measures the atom at
    /// `(i+d3)` against it. The strictly smallest residual wins (ties keep
    /// the earliest rotation); `begin` and `has_plane` are updated from the
    /// winner.
    pub(crate) fn find_plane_with(
        &mut self,
        points: &[Point3<f64>],
        tolerance: f64,
        offsets: (usize, usize, usize),
    ) -> bool {
        let fit = best_plane_fit(points, tolerance, offsets);
        self.begin = fit.begin;
        self.has_plane = fit.within_tolerance;
        self.has_plane
    }

    /// As [`Self::find_plane_with`] with the ring kind's default offsets.
    pub(crate) fn find_plane(&mut self, points: &[Point3<f64>], tolerance: f64) -> bool {
        self.find_plane_with(points, tolerance, self.kind.plane_offsets())
    }
}

pub(crate) fn best_plane_fit(
    points: &[Point3<f64>],
    tolerance: f64,
    (d1, d2, d3): (usize, usize, usize),
) -> PlaneFit {
    let n = points.len();
    let mut fit = PlaneFit {
        begin: 0,
        residual: f64::MAX,
        within_tolerance: false,
    };
    for i in 0..n {
        let plane = Plane::from_points(&points[i], &points[(i + d1) % n], &points[(i + d2) % n]);
        let residual = plane.signed_distance(&points[(i + d3) % n]).abs();
        if residual < fit.residual {
            fit.begin = i;
            fit.residual = residual;
            fit.within_tolerance = residual <= tolerance;
        }
    }
    fit
}
