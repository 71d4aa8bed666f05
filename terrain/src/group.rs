use crate::{Point, Source, TerrainError};

/// An ordered collection of sources acting as one.
///
/// Every member covering a point gets to resolve it, so overlapping
/// sources providing different layers all contribute.
#[derive(Default)]
pub struct SourceGroup {
    sources: Vec<Box<dyn Source>>,
}

impl SourceGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Source + 'static>(&mut self, source: S) {
        self.sources.push(Box::new(source));
    }

    #[must_use]
    pub fn with<S: Source + 'static>(mut self, source: S) -> Self {
        self.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Source for SourceGroup {
    fn contains(&self, point: &Point) -> bool {
        self.sources.iter().any(|source| source.contains(point))
    }

    fn resolve(&self, point: &mut Point) -> Result<(), TerrainError> {
        for source in &self.sources {
            if source.contains(point) {
                source.resolve(point)?;
            }
        }
        Ok(())
    }
}
