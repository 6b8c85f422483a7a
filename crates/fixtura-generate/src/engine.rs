use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use fixtura_catalog::SchemaCatalog;
use fixtura_core::{ClassName, ColumnDescriptor};

use crate::cache::SchemaCache;
use crate::errors::{FixtureError, Result};
use crate::generators::{FixtureValue, GeneratorContext, GeneratorRegistry};
use crate::model::{Attributes, Model, ModelRegistry, downcast};
use crate::options::{FixtureOptions, Mode};
use crate::persistence::PersistenceGateway;
use crate::relationship::RelationshipDetector;

/// Column left to storage when no override names it.
const AUTO_ID_COLUMN: &str = "id";

/// State of one top-level build, threaded through relationship recursion.
#[derive(Debug, Clone)]
pub(crate) struct BuildContext {
    mode: Mode,
    root_namespace: Option<String>,
    chain: Vec<String>,
}

impl BuildContext {
    fn top_level(class_name: &ClassName, mode: Mode) -> Self {
        Self {
            mode,
            root_namespace: class_name.namespace().map(str::to_string),
            chain: Vec::new(),
        }
    }

    fn saving(&self) -> bool {
        self.mode == Mode::Create
    }

    fn root_namespace(&self) -> Option<&str> {
        self.root_namespace.as_deref()
    }

    /// Push `class_name` onto the chain of models under construction,
    /// outermost first.
    fn enter(&self, class_name: &str) -> Result<Self> {
        let mut chain = self.chain.clone();
        chain.push(class_name.to_string());
        if self.chain.iter().any(|entered| entered == class_name) {
            return Err(FixtureError::RelationshipCycle { chain });
        }

        Ok(Self {
            mode: self.mode,
            root_namespace: self.root_namespace.clone(),
            chain,
        })
    }

    fn related(&self) -> Self {
        Self {
            mode: Mode::Create,
            root_namespace: self.root_namespace.clone(),
            chain: self.chain.clone(),
        }
    }
}

/// Entry point for building fixtures from a model's table columns.
pub struct FixtureEngine {
    models: ModelRegistry,
    cache: SchemaCache,
    generators: GeneratorRegistry,
    detector: RelationshipDetector,
    persistence: Box<dyn PersistenceGateway>,
    options: FixtureOptions,
    rng: ChaCha8Rng,
}

impl FixtureEngine {
    pub fn new(
        catalog: impl SchemaCatalog + 'static,
        models: ModelRegistry,
        persistence: impl PersistenceGateway + 'static,
    ) -> Self {
        let options = FixtureOptions::default();
        Self {
            models,
            cache: SchemaCache::new(catalog),
            generators: GeneratorRegistry::with_defaults(),
            detector: RelationshipDetector::default(),
            persistence: Box::new(persistence),
            rng: seeded_rng(&options),
            options,
        }
    }

    /// Replace the options, reseeding the generators.
    pub fn with_options(mut self, options: FixtureOptions) -> Self {
        self.rng = seeded_rng(&options);
        self.options = options;
        self
    }

    pub fn with_generators(mut self, generators: GeneratorRegistry) -> Self {
        self.generators = generators;
        self
    }

    pub fn with_detector(mut self, detector: RelationshipDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn options(&self) -> &FixtureOptions {
        &self.options
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut ModelRegistry {
        &mut self.models
    }

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    pub fn generators_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.generators
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Start a new cache scope; the next build re-reads every table.
    pub fn reset_cache(&mut self) {
        self.cache.reset();
    }

    /// Build a fixture for `identifier`, persisting it in [`Mode::Create`].
    pub fn build(
        &mut self,
        identifier: &str,
        overrides: Attributes,
        mode: Mode,
    ) -> Result<Box<dyn Model>> {
        let class_name = ClassName::parse(identifier)
            .ok_or_else(|| FixtureError::ModelNotFound(identifier.to_string()))?;
        let ctx = BuildContext::top_level(&class_name, mode);

        let instance = self.build_class(&class_name, overrides, &ctx)?;
        info!(model = %class_name, %mode, "fixture built");
        Ok(instance)
    }

    pub fn make(&mut self, identifier: &str, overrides: Attributes) -> Result<Box<dyn Model>> {
        self.build(identifier, overrides, Mode::Make)
    }

    pub fn create(&mut self, identifier: &str, overrides: Attributes) -> Result<Box<dyn Model>> {
        self.build(identifier, overrides, Mode::Create)
    }

    /// Attributes of the instance [`FixtureEngine::make`] would produce.
    pub fn attributes_for(
        &mut self,
        identifier: &str,
        overrides: Attributes,
    ) -> Result<Attributes> {
        Ok(self.make(identifier, overrides)?.attributes())
    }

    pub fn make_many(
        &mut self,
        identifier: &str,
        count: usize,
        overrides: Attributes,
    ) -> Result<Vec<Box<dyn Model>>> {
        (0..count)
            .map(|_| self.make(identifier, overrides.clone()))
            .collect()
    }

    pub fn create_many(
        &mut self,
        identifier: &str,
        count: usize,
        overrides: Attributes,
    ) -> Result<Vec<Box<dyn Model>>> {
        (0..count)
            .map(|_| self.create(identifier, overrides.clone()))
            .collect()
    }

    /// Like [`FixtureEngine::make`], returning the concrete model type.
    pub fn make_as<M: Model>(&mut self, identifier: &str, overrides: Attributes) -> Result<M> {
        let instance = self.make(identifier, overrides)?;
        downcast(instance, identifier)
    }

    /// Like [`FixtureEngine::create`], returning the concrete model type.
    pub fn create_as<M: Model>(&mut self, identifier: &str, overrides: Attributes) -> Result<M> {
        let instance = self.create(identifier, overrides)?;
        downcast(instance, identifier)
    }

    /// Shorthand builder: `engine.fixture("post").set("title", "Hello").make()`.
    pub fn fixture(&mut self, identifier: &str) -> FixtureBuilder<'_> {
        FixtureBuilder {
            engine: self,
            identifier: identifier.to_string(),
            overrides: Attributes::new(),
        }
    }

    fn build_class(
        &mut self,
        class_name: &ClassName,
        overrides: Attributes,
        ctx: &BuildContext,
    ) -> Result<Box<dyn Model>> {
        let model_type = self.models.resolve(class_name)?.clone();
        let ctx = ctx.enter(model_type.class_name())?;
        let columns = self.cache.columns_for(model_type.table())?;

        let mut instance = model_type.new_instance();
        let mut processed: HashSet<&str> = HashSet::new();

        for column in columns.iter() {
            processed.insert(column.name.as_str());

            if let Some(value) = overrides.get(&column.name) {
                debug!(model = model_type.class_name(), column = %column.name, "override");
                instance.assign(&column.name, value.clone())?;
                continue;
            }

            if let Some(related) = self.related_model(&column.name, &ctx) {
                let key = self.create_related(&related, &ctx)?;
                debug!(
                    model = model_type.class_name(),
                    column = %column.name,
                    related = %related,
                    "relationship"
                );
                instance.assign(&column.name, key)?;
                continue;
            }

            if column.name == AUTO_ID_COLUMN {
                continue;
            }

            let value = self.stub_value(column)?;
            instance.assign(&column.name, value)?;
        }

        for (attribute, value) in overrides {
            if !processed.contains(attribute.as_str()) {
                instance.assign(&attribute, value)?;
            }
        }

        if ctx.saving() {
            self.persistence
                .save(&model_type, instance.as_mut())
                .map_err(FixtureError::Persistence)?;
            info!(
                model = model_type.class_name(),
                table = model_type.table(),
                "fixture persisted"
            );
        }

        Ok(instance)
    }

    fn related_model(&self, column: &str, ctx: &BuildContext) -> Option<ClassName> {
        if !ctx.saving() || !self.options.detect_relationships {
            return None;
        }
        self.detector.detect(column, ctx.root_namespace(), &self.models)
    }

    fn create_related(
        &mut self,
        class_name: &ClassName,
        ctx: &BuildContext,
    ) -> Result<FixtureValue> {
        let related = self.build_class(class_name, Attributes::new(), &ctx.related())?;
        let primary_key = self.models.resolve(class_name)?.primary_key();

        related
            .attribute(primary_key)
            .filter(|value| !value.is_null())
            .ok_or_else(|| FixtureError::MissingPrimaryKey {
                model: class_name.canonical(),
            })
    }

    fn stub_value(&mut self, column: &ColumnDescriptor) -> Result<FixtureValue> {
        let ctx = GeneratorContext {
            column,
            base_date: self.options.base_date,
            locale: self.options.locale,
        };
        self.generators.resolve(&ctx, &mut self.rng)
    }
}

fn seeded_rng(options: &FixtureOptions) -> ChaCha8Rng {
    match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

/// Overrides collected for one fixture before it is built.
pub struct FixtureBuilder<'e> {
    engine: &'e mut FixtureEngine,
    identifier: String,
    overrides: Attributes,
}

impl FixtureBuilder<'_> {
    pub fn set(mut self, attribute: impl Into<String>, value: impl Into<FixtureValue>) -> Self {
        self.overrides.insert(attribute.into(), value.into());
        self
    }

    pub fn with(mut self, overrides: Attributes) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn make(self) -> Result<Box<dyn Model>> {
        self.engine.make(&self.identifier, self.overrides)
    }

    pub fn create(self) -> Result<Box<dyn Model>> {
        self.engine.create(&self.identifier, self.overrides)
    }

    pub fn attributes(self) -> Result<Attributes> {
        self.engine.attributes_for(&self.identifier, self.overrides)
    }

    pub fn make_as<M: Model>(self) -> Result<M> {
        self.engine.make_as(&self.identifier, self.overrides)
    }

    pub fn create_as<M: Model>(self) -> Result<M> {
        self.engine.create_as(&self.identifier, self.overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_context_saves_and_keeps_namespace() {
        let class_name = ClassName::parse("blog/post").expect("class name");
        let ctx = BuildContext::top_level(&class_name, Mode::Make);
        assert!(!ctx.saving());
        assert_eq!(ctx.root_namespace(), Some("Blog"));

        let entered = ctx.enter("Blog::Post").expect("first entry");
        let related = entered.related();
        assert!(related.saving());
        assert_eq!(related.root_namespace(), Some("Blog"));
        assert_eq!(related.chain, vec!["Blog::Post"]);
    }

    #[test]
    fn entering_a_model_twice_is_a_cycle() {
        let class_name = ClassName::parse("chicken").expect("class name");
        let ctx = BuildContext::top_level(&class_name, Mode::Create)
            .enter("Chicken")
            .and_then(|ctx| ctx.enter("Egg"))
            .expect("chain");

        match ctx.enter("Chicken") {
            Err(FixtureError::RelationshipCycle { chain }) => {
                assert_eq!(chain, vec!["Chicken", "Egg", "Chicken"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
