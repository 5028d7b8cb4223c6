//! @ai:module:intent Run one extraction task per input source and merge the results
//! @ai:module:layer application
//! @ai:module:public_api dispatch
//! @ai:module:depends_on input, doc, diagnostics
//! @ai:module:stateless true

use crate::doc::Doc;
use crate::input::{Extractor, InputOptions};
use std::sync::Arc;
use tracing::{debug, info};

/// @ai:intent Extract every input concurrently and build the finalized document
/// @ai:pre inputs have been sanitized
/// @ai:post results are merged in input declaration order, whatever order tasks finish in
/// @ai:post a failed source is reported on its error sink and contributes nothing
/// @ai:effects fs:read, log
pub async fn dispatch<E>(inputs: &[InputOptions], extractor: Arc<E>) -> Doc
where
    E: Extractor + ?Sized + 'static,
{
    let handles: Vec<_> = inputs
        .iter()
        .cloned()
        .map(|input| {
            let extractor = Arc::clone(&extractor);
            tokio::task::spawn_blocking(move || extractor.extract(&input))
        })
        .collect();

    debug!("Started {} extraction tasks", handles.len());

    // Barrier: nothing is merged until every task has finished.
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await);
    }

    let mut doc = Doc::new();
    for (input, result) in inputs.iter().zip(results) {
        let diagnostics = input.diagnostics();
        let source = input.dir.display();

        match result {
            Ok(Ok(extraction)) => {
                for issue in &extraction.issues {
                    diagnostics.warn(&issue.to_string());
                }
                info!(
                    "Extracted {} APIs from {} ({} issues)",
                    extraction.apis.len(),
                    source,
                    extraction.issues.len()
                );
                doc.merge(extraction);
            }
            Ok(Err(e)) => diagnostics.error(&format!("Failed to extract {}: {}", source, e)),
            Err(e) => diagnostics.error(&format!("Extraction task for {} aborted: {}", source, e)),
        }
    }

    doc.finalize();
    doc
}
