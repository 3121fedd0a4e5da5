//! Best-effort diagnostic probing of candidate RAM addresses
//!
//! Reads chunks at fixed candidate absolute addresses through the raw
//! path and pattern-matches their contents (e.g. against a game ID).
//! This is a fallback with no reliability guarantee and is never used
//! by the primary classification path.

use crate::memory::accessor::MemoryAccessor;
use crate::platform::ProcessBackend;
use tracing::debug;

/// One pattern hit inside a probed candidate range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeMatch {
    /// Index into the pattern list handed to the probe
    pub pattern_index: usize,
    /// Absolute host address of the match
    pub address: u64,
}

/// Findings for one candidate base address
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Candidate base address
    pub base: u64,
    /// Bytes successfully inspected before the first failed read
    pub bytes_probed: u64,
    /// Pattern hits, in address order
    pub matches: Vec<ProbeMatch>,
}

/// Probes each candidate address, reading `span` bytes in `chunk`-sized
/// pieces and recording where any of the byte patterns occur. A failed
/// read ends the probe of that candidate; remaining candidates are
/// still inspected.
pub fn probe_candidates<B: ProcessBackend>(
    accessor: &MemoryAccessor<B>,
    candidates: &[u64],
    patterns: &[&[u8]],
    span: u64,
    chunk: usize,
) -> Vec<ProbeReport> {
    let mut reports = Vec::with_capacity(candidates.len());

    for &base in candidates {
        let mut report = ProbeReport {
            base,
            bytes_probed: 0,
            matches: Vec::new(),
        };

        let mut offset = 0u64;
        while offset < span {
            let len = chunk.min((span - offset) as usize);
            let data = match accessor.read_at_address(base + offset, len) {
                Ok(data) => data,
                Err(err) => {
                    debug!(
                        base = format_args!("{:#x}", base),
                        offset, %err, "candidate probe read failed"
                    );
                    break;
                }
            };

            for (pattern_index, pattern) in patterns.iter().enumerate() {
                if pattern.is_empty() {
                    continue;
                }
                for (pos, window) in data.windows(pattern.len()).enumerate() {
                    if window == *pattern {
                        report.matches.push(ProbeMatch {
                            pattern_index,
                            address: base + offset + pos as u64,
                        });
                    }
                }
            }

            report.bytes_probed += data.len() as u64;
            offset += len as u64;
        }

        report.matches.sort_by_key(|m| m.address);
        reports.push(report);
    }

    reports
}
