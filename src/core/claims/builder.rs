use super::KycClaims;

/// Accumulates requested KYC attributes. Each setter fills exactly one slot.
#[derive(Debug, Clone, Default)]
pub struct KycClaimsBuilder {
    claims: KycClaims,
}

impl KycClaimsBuilder {
    pub fn build(self) -> KycClaims {
        self.claims
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.claims.name = Some(name);
        self
    }

    pub fn with_given_name(mut self, given_name: String) -> Self {
        self.claims.given_name = Some(given_name);
        self
    }

    pub fn with_family_name(mut self, family_name: String) -> Self {
        self.claims.family_name = Some(family_name);
        self
    }

    pub fn with_address(mut self, address: String) -> Self {
        self.claims.address = Some(address);
        self
    }

    pub fn with_houseno_or_housename(mut self, houseno_or_housename: String) -> Self {
        self.claims.houseno_or_housename = Some(houseno_or_housename);
        self
    }

    pub fn with_postal_code(mut self, postal_code: String) -> Self {
        self.claims.postal_code = Some(postal_code);
        self
    }

    pub fn with_town(mut self, town: String) -> Self {
        self.claims.town = Some(town);
        self
    }

    pub fn with_country(mut self, country: String) -> Self {
        self.claims.country = Some(country);
        self
    }

    pub fn with_birthdate(mut self, birthdate: String) -> Self {
        self.claims.birthdate = Some(birthdate);
        self
    }

    pub fn with_name_hashed(mut self, name: String) -> Self {
        self.claims.name_hashed = Some(name);
        self
    }

    pub fn with_given_name_hashed(mut self, given_name: String) -> Self {
        self.claims.given_name_hashed = Some(given_name);
        self
    }

    pub fn with_family_name_hashed(mut self, family_name: String) -> Self {
        self.claims.family_name_hashed = Some(family_name);
        self
    }

    pub fn with_address_hashed(mut self, address: String) -> Self {
        self.claims.address_hashed = Some(address);
        self
    }

    pub fn with_houseno_or_housename_hashed(mut self, houseno_or_housename: String) -> Self {
        self.claims.houseno_or_housename_hashed = Some(houseno_or_housename);
        self
    }

    pub fn with_postal_code_hashed(mut self, postal_code: String) -> Self {
        self.claims.postal_code_hashed = Some(postal_code);
        self
    }

    pub fn with_town_hashed(mut self, town: String) -> Self {
        self.claims.town_hashed = Some(town);
        self
    }

    pub fn with_country_hashed(mut self, country: String) -> Self {
        self.claims.country_hashed = Some(country);
        self
    }

    pub fn with_birthdate_hashed(mut self, birthdate: String) -> Self {
        self.claims.birthdate_hashed = Some(birthdate);
        self
    }
}
