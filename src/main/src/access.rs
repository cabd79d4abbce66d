use log::*;

use control::{DebugLevel, TagDisplay, Verdict};

/// Puts a tag read on the console if the debug level asks for it.
pub fn report_tag(level: DebugLevel, tag: u32, verdict: Verdict) -> bool {
    let Some(radix) = level.radix_for(verdict) else {
        return false;
    };
    let tag = TagDisplay { tag, radix };
    match verdict {
        Verdict::Granted => info!("Access granted for tag {}", tag),
        Verdict::Denied => info!("Access denied for tag {}", tag),
    }
    true
}
