//! Domain entity representing a cat breed.

/// A breed that kittens belong to.
///
/// Breed names are unique. Deleting a breed removes every kitten of that
/// breed (and, transitively, their ratings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breed {
    pub id: i64,
    pub name: String,
}

impl Breed {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Input data for creating a new breed.
#[derive(Debug, Clone)]
pub struct NewBreed {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breed_creation() {
        let breed = Breed::new(1, "Сиамская");

        assert_eq!(breed.id, 1);
        assert_eq!(breed.name, "Сиамская");
    }
}
