use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

// The backend is inconsistent about a booking's `pets` field: sometimes a
// single object, sometimes an array (occasionally with null entries),
// sometimes null or absent. This is the one place that shape is normalized;
// everything past the gateway edge sees a plain Vec<Pet>.
pub fn deserialize_pets<'de, D>(deserializer: D) -> Result<Vec<Pet>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PetsField {
        Many(Vec<Option<Pet>>),
        One(Box<Pet>),
    }

    let raw = Option::<PetsField>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(PetsField::One(pet)) => vec![*pet],
        Some(PetsField::Many(pets)) => pets.into_iter().flatten().collect(),
    })
}
