use crate::{Command, Heading};

impl quickcheck::Arbitrary for Heading {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Heading::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Command {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Command::ALL).unwrap()
    }
}
