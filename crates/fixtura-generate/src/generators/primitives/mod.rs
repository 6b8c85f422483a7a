use chrono::{Duration, NaiveTime};
use fake::faker::lorem::en::{Sentence, Word, Words};
use rand::{Rng, RngCore};
use serde_json::{Map, Value};

use fixtura_core::DeclaredType;

use crate::errors::Result;
use crate::generators::{FixtureValue, Generator, GeneratorContext, GeneratorRegistry, fake_with};

const DATE_SPAN_DAYS: i64 = 365;
const SECONDS_PER_DAY: u32 = 86_400;

pub fn register(registry: &mut GeneratorRegistry) {
    for declared in DeclaredType::ALL {
        let name = declared.as_str();
        match declared {
            DeclaredType::String => registry.register_type(name, StringGenerator),
            DeclaredType::Text => registry.register_type(name, TextGenerator),
            DeclaredType::Integer => registry.register_type(
                name,
                IntRangeGenerator {
                    id: "primitive.integer",
                    min: 1,
                    max: 100_000,
                },
            ),
            DeclaredType::BigInt => registry.register_type(
                name,
                IntRangeGenerator {
                    id: "primitive.bigint",
                    min: 1,
                    max: 1_000_000_000,
                },
            ),
            DeclaredType::SmallInt => registry.register_type(
                name,
                IntRangeGenerator {
                    id: "primitive.smallint",
                    min: 1,
                    max: 32_000,
                },
            ),
            DeclaredType::Float => registry.register_type(name, FloatGenerator),
            DeclaredType::Decimal => registry.register_type(name, DecimalGenerator),
            DeclaredType::Boolean => registry.register_type(name, BoolGenerator),
            DeclaredType::Date => registry.register_type(name, DateGenerator),
            DeclaredType::DateTime => registry.register_type(name, DateTimeGenerator),
            DeclaredType::Time => registry.register_type(name, TimeGenerator),
            DeclaredType::Uuid => registry.register_type(name, UuidGenerator),
            DeclaredType::Json => registry.register_type(name, JsonGenerator),
        }
    }
}

struct StringGenerator;

impl Generator for StringGenerator {
    fn id(&self) -> &str {
        "primitive.string"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let words: Vec<String> = fake_with(Words(2..4), rng);
        Ok(FixtureValue::Text(words.join(" ")))
    }
}

struct TextGenerator;

impl Generator for TextGenerator {
    fn id(&self) -> &str {
        "primitive.text"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let sentence: String = fake_with(Sentence(6..14), rng);
        Ok(FixtureValue::Text(sentence))
    }
}

struct IntRangeGenerator {
    id: &'static str,
    min: i64,
    max: i64,
}

impl Generator for IntRangeGenerator {
    fn id(&self) -> &str {
        self.id
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        Ok(FixtureValue::Int(rng.random_range(self.min..=self.max)))
    }
}

struct FloatGenerator;

impl Generator for FloatGenerator {
    fn id(&self) -> &str {
        "primitive.float"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        Ok(FixtureValue::Float(rng.random_range(0.0..10_000.0)))
    }
}

struct DecimalGenerator;

impl Generator for DecimalGenerator {
    fn id(&self) -> &str {
        "primitive.decimal"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let cents: i64 = rng.random_range(0..=1_000_000);
        Ok(FixtureValue::Float(cents as f64 / 100.0))
    }
}

struct BoolGenerator;

impl Generator for BoolGenerator {
    fn id(&self) -> &str {
        "primitive.boolean"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        Ok(FixtureValue::Bool(rng.random_bool(0.5)))
    }
}

struct DateGenerator;

impl Generator for DateGenerator {
    fn id(&self) -> &str {
        "primitive.date"
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let offset = rng.random_range(0..=DATE_SPAN_DAYS);
        Ok(FixtureValue::Date(ctx.base_date + Duration::days(offset)))
    }
}

struct DateTimeGenerator;

impl Generator for DateTimeGenerator {
    fn id(&self) -> &str {
        "primitive.datetime"
    }

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let offset = rng.random_range(0..=DATE_SPAN_DAYS);
        let date = ctx.base_date + Duration::days(offset);
        let time = random_time(rng);
        Ok(FixtureValue::Timestamp(date.and_time(time)))
    }
}

struct TimeGenerator;

impl Generator for TimeGenerator {
    fn id(&self) -> &str {
        "primitive.time"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        Ok(FixtureValue::Time(random_time(rng)))
    }
}

struct UuidGenerator;

impl Generator for UuidGenerator {
    fn id(&self) -> &str {
        "primitive.uuid"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let mut bytes = [0_u8; 16];
        rng.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        Ok(FixtureValue::Uuid(uuid.to_string()))
    }
}

struct JsonGenerator;

impl Generator for JsonGenerator {
    fn id(&self) -> &str {
        "primitive.json"
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let key: String = fake_with(Word(), rng);
        let value: String = fake_with(Word(), rng);
        let mut object = Map::new();
        object.insert(key, Value::String(value));
        Ok(FixtureValue::Json(Value::Object(object)))
    }
}

fn random_time(rng: &mut dyn RngCore) -> NaiveTime {
    let seconds = rng.random_range(0..SECONDS_PER_DAY);
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
}
