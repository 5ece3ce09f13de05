//! Fixed sample data for the `seed` binary.

use contacts_core::{ContactFields, ContactRepository};

fn sample(
  first: &str,
  last: &str,
  email: &str,
  color: &str,
  birthday: &str,
) -> ContactFields {
  ContactFields {
    favorite_color: Some(color.to_owned()),
    birthday: Some(birthday.to_owned()),
    ..ContactFields::new(first, last, email)
  }
}

pub fn sample_contacts() -> Vec<ContactFields> {
  vec![
    sample("Victor", "Patrick", "victor@example.com", "Blue", "1995-07-12"),
    sample("Zik", "Johnson", "zik@example.com", "Green", "1994-03-25"),
    sample("Ada", "Williams", "ada@example.com", "Purple", "1996-09-14"),
  ]
}

/// Delete every contact and insert [`sample_contacts`]. Returns the number
/// inserted.
pub async fn run(repo: &ContactRepository) -> contacts_core::Result<usize> {
  repo.reset(sample_contacts()).await
}
