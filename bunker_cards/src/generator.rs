//! Randomized character-card generation.
//!
//! Every card gets a fresh age (never reused while the process lives) and a
//! random gender/fertility pair. Values produced by earlier cards are listed
//! in the prompt so the backend avoids repeating them.

use bunker_core::{DEFAULT_SYSTEM_PROMPT, LLMProvider, LLMResponse};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{GenerateError, Result};
use crate::extract::FieldExtractor;
use crate::store::{Category, ValueStore};

pub const GENDERS: [&str; 2] = ["Мужской", "Женский"];
pub const FERTILITY: [&str; 2] = ["плоден", "бесплоден"];

/// What to do once every age in the range has been handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Refuse to generate further cards.
    #[default]
    Fail,
    /// Forget the used ages and start over.
    Recycle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeConfig {
    #[serde(default = "AgeConfig::default_min")]
    pub min: u32,
    #[serde(default = "AgeConfig::default_max")]
    pub max: u32,
    #[serde(default)]
    pub on_exhausted: ExhaustionPolicy,
}

impl Default for AgeConfig {
    fn default() -> Self {
        Self {
            min: Self::default_min(),
            max: Self::default_max(),
            on_exhausted: ExhaustionPolicy::default(),
        }
    }
}

impl AgeConfig {
    /// Largest number of distinct ages a range may hold.
    pub const MAX_SPAN: u32 = 1_000;

    /// `min <= max` and the range holds at most [`Self::MAX_SPAN`] ages.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min <= self.max && self.max - self.min < Self::MAX_SPAN
    }

    const fn default_min() -> u32 {
        9
    }

    const fn default_max() -> u32 {
        70
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub age: AgeConfig,
    /// Only the most recent N values per category are listed in the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_window: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Pinned attributes and exclusion lists for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub age: u32,
    pub gender: &'static str,
    pub fertility: &'static str,
    pub exclusions: Vec<(Category, Vec<String>)>,
}

impl GenerationRequest {
    /// Append the directives to the base template.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut prompt = String::from(template);

        prompt.push_str("\nИспользуй следующие параметры:\n");
        prompt.push_str(&format!("Возраст: {} лет\n", self.age));
        prompt.push_str(&format!("Пол: {}, {}\n", self.gender, self.fertility));

        if !self.exclusions.is_empty() {
            prompt.push_str("\nПожалуйста, не используйте следующие значения:\n");
            for (category, values) in &self.exclusions {
                prompt.push_str(&format!(
                    "\n{}: {}",
                    category.prompt_label(),
                    values.join(", ")
                ));
            }
        }

        prompt
    }
}

pub struct CardGenerator<P> {
    provider: P,
    store: Arc<Mutex<ValueStore>>,
    rng: Mutex<StdRng>,
    extractor: FieldExtractor,
    config: GeneratorConfig,
    template: String,
    timeout: Option<Duration>,
}

impl<P> CardGenerator<P>
where
    P: LLMProvider,
{
    /// Create a generator that records into `store`.
    ///
    /// # Errors
    /// Returns an error if the age range is empty or too wide, or the
    /// extraction table fails to compile.
    pub fn new(
        provider: P,
        store: Arc<Mutex<ValueStore>>,
        config: GeneratorConfig,
    ) -> Result<Self> {
        if !config.age.is_valid() {
            return Err(GenerateError::InvalidAgeRange {
                min: config.age.min,
                max: config.age.max,
            });
        }

        let timeout = config.request_timeout_secs.map(Duration::from_secs);

        Ok(Self {
            provider,
            store,
            rng: Mutex::new(StdRng::from_os_rng()),
            extractor: FieldExtractor::with_defaults()?,
            config,
            template: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout,
        })
    }

    /// Replace the base template the directives are appended to.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn store(&self) -> Arc<Mutex<ValueStore>> {
        Arc::clone(&self.store)
    }

    /// Draw the pinned attributes and snapshot the exclusion lists.
    ///
    /// The drawn age is recorded before this returns, so it stays reserved
    /// even if the backend call later fails.
    pub async fn prepare(&self) -> Result<GenerationRequest> {
        let mut store = self.store.lock().await;
        let mut rng = self.rng.lock().await;

        let age = self.draw_age(&mut store, &mut rng)?;
        let gender = GENDERS[rng.random_range(0..GENDERS.len())];
        let fertility = FERTILITY[rng.random_range(0..FERTILITY.len())];

        let exclusions = Category::ALL
            .into_iter()
            .filter(|category| *category != Category::Age)
            .filter_map(|category| {
                let values = store.values(category);
                let start = self
                    .config
                    .exclusion_window
                    .map_or(0, |window| values.len().saturating_sub(window));
                let recent = &values[start..];
                (!recent.is_empty()).then(|| (category, recent.to_vec()))
            })
            .collect();

        Ok(GenerationRequest {
            age,
            gender,
            fertility,
            exclusions,
        })
    }

    fn draw_age(&self, store: &mut ValueStore, rng: &mut StdRng) -> Result<u32> {
        let AgeConfig {
            min,
            max,
            on_exhausted,
        } = self.config.age;

        let mut free: Vec<u32> = (min..=max)
            .filter(|age| !store.contains(Category::Age, &age.to_string()))
            .collect();

        if free.is_empty() {
            match on_exhausted {
                ExhaustionPolicy::Fail => {
                    return Err(GenerateError::AgeDomainExhausted { min, max });
                }
                ExhaustionPolicy::Recycle => {
                    warn!("All ages in {min}..={max} used, recycling");
                    store.clear(Category::Age);
                    free = (min..=max).collect();
                }
            }
        }

        let age = free[rng.random_range(0..free.len())];
        store.insert(Category::Age, &age.to_string());
        Ok(age)
    }

    async fn complete(&self, prompt: &str) -> Result<LLMResponse> {
        let call = self.provider.complete(prompt);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GenerateError::Timeout(limit))?
                .map_err(GenerateError::from),
            None => Ok(call.await?),
        }
    }

    /// Generate one card and return the backend text unchanged.
    ///
    /// Backend failures are returned as-is; only the drawn age is kept.
    pub async fn generate(&self) -> Result<String> {
        let request = self.prepare().await?;
        let prompt = request.render(&self.template);

        info!(
            "Requesting card: age={}, gender={}, fertility={}, excluded categories={}",
            request.age,
            request.gender,
            request.fertility,
            request.exclusions.len()
        );
        debug!("Card prompt:\n{prompt}");

        let response = self.complete(&prompt).await?;

        let card = self.extractor.extract(&response.content);
        let added = self.store.lock().await.fold(&card);

        info!(
            "Card generated: {} fields extracted, {added} new values recorded",
            card.len()
        );

        Ok(response.content)
    }
}
