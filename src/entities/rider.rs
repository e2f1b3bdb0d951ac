use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub payment_method: String,
}

impl Rider {
    pub fn new(
        id: String,
        name: String,
        phone_number: String,
        payment_method: String,
    ) -> Result<Self, Error> {
        let fields = [&id, &name, &phone_number, &payment_method];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(Error::invalid_request_error(
                "id, name, phone_number and payment_method are required",
            ));
        }

        Ok(Self {
            id,
            name,
            phone_number,
            payment_method,
        })
    }
}
