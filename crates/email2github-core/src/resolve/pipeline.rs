//! Ordered chain of resolvers.

use tracing::{debug, info, warn};

use super::{PassOutcome, ResolveError, Resolver};
use crate::identity::Identity;

/// Runs resolvers in order over the identities they have not resolved yet
pub struct ResolutionPipeline {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolutionPipeline {
    /// Create a pipeline; resolvers run in the given order
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Configured technique names, in run order
    pub fn techniques(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Resolve `identities` in place.
    ///
    /// Each resolver sees only the identities still unresolved when its turn
    /// comes; once none are left the remaining resolvers are skipped.
    /// Returns the identities nobody could resolve. Partial resolution is a
    /// normal outcome; only a session authentication failure is an error.
    pub async fn run<'i>(
        &self,
        identities: &'i mut [Identity],
    ) -> Result<Vec<&'i Identity>, ResolveError> {
        for resolver in &self.resolvers {
            let batch: Vec<&mut Identity> = identities
                .iter_mut()
                .filter(|identity| !identity.is_resolved())
                .collect();
            if batch.is_empty() {
                debug!("All identities resolved; skipping {}", resolver.name());
                break;
            }

            let pending = batch.len();
            info!("Running {} on {} identities", resolver.name(), pending);

            let outcome = resolver.resolve(batch).await?;
            let resolved = outcome.resolved();
            match outcome {
                PassOutcome::Completed { .. } => {
                    info!("{} resolved {}/{}", resolver.name(), resolved, pending);
                }
                PassOutcome::Interrupted { reason, .. } => {
                    warn!(
                        "{} interrupted after resolving {}/{}: {}",
                        resolver.name(),
                        resolved,
                        pending,
                        reason
                    );
                }
            }
        }

        let identities: &'i [Identity] = identities;
        Ok(identities
            .iter()
            .filter(|identity| !identity.is_resolved())
            .collect())
    }
}
