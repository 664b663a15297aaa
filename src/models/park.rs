use serde::{Deserialize, Serialize};

use super::Required;
use crate::core::errors::ApiError;
use crate::core::helpers::{new_id, now_iso};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Park {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub location: String,
    pub established: String,
    pub area: String,
    pub rec_visitors: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Client-supplied park fields. Unknown keys (such as `owner`) are ignored.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct ParkInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub established: Option<String>,
    pub area: Option<String>,
    pub rec_visitors: Option<String>,
    pub description: Option<String>,
}

pub type ParkPatch = ParkInput;

impl Park {
    pub fn create(input: ParkInput) -> Result<Park, ApiError> {
        let mut required = Required::default();
        let name = required.take("name", input.name);
        let image = required.take("image", input.image);
        let location = required.take("location", input.location);
        let established = required.take("established", input.established);
        let area = required.take("area", input.area);
        let rec_visitors = required.take("rec_visitors", input.rec_visitors);
        let description = required.take("description", input.description);
        required.finish("Park")?;

        let now = now_iso();
        Ok(Park {
            id: new_id(),
            name,
            image,
            location,
            established,
            area,
            rec_visitors,
            description,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Parks record no owner.
    pub fn owner(&self) -> Option<&str> {
        None
    }

    /// Overwrites only the fields present in `patch`.
    pub fn apply(&mut self, patch: ParkPatch) {
        let fields = [
            (&mut self.name, patch.name),
            (&mut self.image, patch.image),
            (&mut self.location, patch.location),
            (&mut self.established, patch.established),
            (&mut self.area, patch.area),
            (&mut self.rec_visitors, patch.rec_visitors),
            (&mut self.description, patch.description),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        self.updated_at = now_iso();
    }
}
