use fake::faker::address::raw::{BuildingNumber, CityName, StateName, StreetName, ZipCode};
use fake::faker::internet::raw::{DomainSuffix, SafeEmail};
use fake::faker::lorem::raw::{Sentence, Word};
use fake::faker::name::raw::Name;
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{EN, PT_BR};
use rand::{Rng, RngCore};

use crate::errors::Result;
use crate::generators::{
    FixtureValue, Generator, GeneratorContext, GeneratorRegistry, Locale, fake_with,
};

macro_rules! localized {
    ($ctx:expr, $rng:expr, $faker:ident $(, $arg:expr)*) => {
        match $ctx.locale {
            Locale::EnUs => fake_with($faker(EN $(, $arg)*), $rng),
            Locale::PtBr => fake_with($faker(PT_BR $(, $arg)*), $rng),
        }
    };
}

pub fn register(registry: &mut GeneratorRegistry) {
    for field in SemanticField::ALL {
        registry.register_field(field.column(), SemanticGenerator { field });
    }
}

/// Column names with a dedicated, semantically shaped generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticField {
    Name,
    Email,
    Phone,
    Age,
    Address,
    City,
    State,
    Zip,
    Street,
    Website,
    Title,
}

impl SemanticField {
    pub const ALL: [SemanticField; 11] = [
        SemanticField::Name,
        SemanticField::Email,
        SemanticField::Phone,
        SemanticField::Age,
        SemanticField::Address,
        SemanticField::City,
        SemanticField::State,
        SemanticField::Zip,
        SemanticField::Street,
        SemanticField::Website,
        SemanticField::Title,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            SemanticField::Name => "name",
            SemanticField::Email => "email",
            SemanticField::Phone => "phone",
            SemanticField::Age => "age",
            SemanticField::Address => "address",
            SemanticField::City => "city",
            SemanticField::State => "state",
            SemanticField::Zip => "zip",
            SemanticField::Street => "street",
            SemanticField::Website => "website",
            SemanticField::Title => "title",
        }
    }

    fn id(self) -> &'static str {
        match self {
            SemanticField::Name => "semantic.name",
            SemanticField::Email => "semantic.email",
            SemanticField::Phone => "semantic.phone",
            SemanticField::Age => "semantic.age",
            SemanticField::Address => "semantic.address",
            SemanticField::City => "semantic.city",
            SemanticField::State => "semantic.state",
            SemanticField::Zip => "semantic.zip",
            SemanticField::Street => "semantic.street",
            SemanticField::Website => "semantic.website",
            SemanticField::Title => "semantic.title",
        }
    }
}

struct SemanticGenerator {
    field: SemanticField,
}

impl Generator for SemanticGenerator {
    fn id(&self) -> &str {
        self.field.id()
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let text: String = match self.field {
            SemanticField::Name => localized!(ctx, rng, Name),
            SemanticField::Email => localized!(ctx, rng, SafeEmail),
            SemanticField::Phone => localized!(ctx, rng, PhoneNumber),
            SemanticField::Age => return Ok(FixtureValue::Int(rng.random_range(18..=90))),
            SemanticField::Address => {
                let number: String = localized!(ctx, rng, BuildingNumber);
                let street: String = localized!(ctx, rng, StreetName);
                let city: String = localized!(ctx, rng, CityName);
                format!("{number} {street}, {city}")
            }
            SemanticField::City => localized!(ctx, rng, CityName),
            SemanticField::State => localized!(ctx, rng, StateName),
            SemanticField::Zip => localized!(ctx, rng, ZipCode),
            SemanticField::Street => localized!(ctx, rng, StreetName),
            SemanticField::Website => {
                let word: String = localized!(ctx, rng, Word);
                let suffix: String = localized!(ctx, rng, DomainSuffix);
                format!("https://www.{}.{suffix}", slugify(&word))
            }
            SemanticField::Title => {
                let sentence: String = localized!(ctx, rng, Sentence, 2..5);
                sentence.trim_end_matches('.').to_string()
            }
        };
        Ok(FixtureValue::Text(text))
    }
}

fn slugify(value: &str) -> String {
    let slug: String = value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        "example".to_string()
    } else {
        slug
    }
}
