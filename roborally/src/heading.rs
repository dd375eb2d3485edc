use serde::{Deserialize, Serialize};

/// The direction a robot is facing.
///
/// The board's y axis points south, so [`Heading::South`] increases y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Heading {
    South,
    West,
    North,
    East,
}

impl Heading {
    /// All headings in clockwise order, starting with south.
    pub const ALL: [Heading; 4] = [Heading::South, Heading::West, Heading::North, Heading::East];

    fn index(self) -> usize {
        match self {
            Heading::South => 0,
            Heading::West => 1,
            Heading::North => 2,
            Heading::East => 3,
        }
    }

    /// A quarter turn clockwise.
    pub fn next(self) -> Heading {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// A quarter turn counter-clockwise.
    pub fn prev(self) -> Heading {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn opposite(self) -> Heading {
        Self::ALL[(self.index() + 2) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Heading::South => "SOUTH",
            Heading::West => "WEST",
            Heading::North => "NORTH",
            Heading::East => "EAST",
        }
    }

    /// Arrow used when drawing the board.
    pub fn arrow(self) -> char {
        match self {
            Heading::South => 'v',
            Heading::West => '<',
            Heading::North => '^',
            Heading::East => '>',
        }
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn right_then_left_is_identity(heading: Heading) -> bool {
            heading.next().prev() == heading && heading.prev().next() == heading
        }

        fn four_right_turns_is_identity(heading: Heading) -> bool {
            heading.next().next().next().next() == heading
        }

        fn opposite_is_two_turns(heading: Heading) -> bool {
            heading.opposite() == heading.next().next()
                && heading.opposite().opposite() == heading
        }
    }

    #[test]
    fn turning_right_from_north_faces_east() {
        assert_eq!(Heading::North.next(), Heading::East);
        assert_eq!(Heading::North.prev(), Heading::West);
        assert_eq!(Heading::South.next(), Heading::West);
        assert_eq!(Heading::East.next(), Heading::South);
    }
}
