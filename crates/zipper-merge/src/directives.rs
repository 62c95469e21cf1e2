//! Directive merge: master directives first, then unseen source directives.

use tracing::debug;
use zipper_types::Directive;

/// Merge two directive lists.
///
/// The result is `master` in its original order followed by every `source`
/// directive that does not [`compare`](Directive::compare) equal to a master
/// directive. Provenance is reset on every returned directive, since source
/// positions mean nothing in the merged file.
///
/// Neither input is checked for internal duplicates.
pub fn merge_directives(master: &[Directive], source: &[Directive]) -> Vec<Directive> {
    let mut merged = master.to_vec();
    merged.extend(
        source
            .iter()
            .filter(|candidate| !master.iter().any(|known| candidate.compare(known)))
            .cloned(),
    );

    for directive in &mut merged {
        directive.reset_provenance();
    }

    debug!(
        master = master.len(),
        source = source.len(),
        merged = merged.len(),
        "merged directives"
    );
    merged
}
