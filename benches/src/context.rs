use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(serde::Serialize)]
pub struct Context {
    pub title: String,
    pub users: Vec<User>,
}

#[derive(serde::Serialize)]
pub struct User {
    pub name: String,
    pub age: u32,
    pub is_disabled: bool,
}

/// Generates a context with `n` users.
///
/// The generator is seeded so every run renders the same data. About one in
/// four users is disabled and skipped by the inverted section.
pub fn random(n: usize) -> Context {
    let mut rng = StdRng::seed_from_u64(n as u64);
    Context {
        title: word(&mut rng, 20),
        users: (0..n)
            .map(|_| User {
                name: word(&mut rng, 20),
                age: rng.gen_range(21..100),
                is_disabled: rng.gen_ratio(1, 4),
            })
            .collect(),
    }
}

/// A small fixed context for checking output.
pub fn fixture() -> Context {
    let user = |name: &str, age, is_disabled| User {
        name: name.to_owned(),
        age,
        is_disabled,
    };
    Context {
        title: "My awesome webpage!".to_owned(),
        users: vec![
            user("Nancy Wheeler", 17, false),
            user("Steve Harrington", 18, false),
            user("Billy Hargrove", 19, true),
        ],
    }
}

fn word(rng: &mut StdRng, len: usize) -> String {
    (0..len).map(|_| rng.gen_range('a'..='z')).collect()
}
