//! Resolution of a symbolic status class to one concrete HTTP status code

use rand::Rng;

use super::class::StatusClass;

const SUCCESS_CODES: &[u16] = &[200, 201, 202];

const REDIRECTION_CODES: &[u16] = &[301, 302, 304, 307, 308];

const CLIENT_ERROR_CODES: &[u16] = &[400, 401, 403, 404, 405, 406, 408, 413, 415, 429, 431];

const SERVER_ERROR_CODES: &[u16] = &[500, 501, 502, 503, 504];

const RANDOM_CODES: &[u16] = &[
    200, 201, 202, 301, 302, 304, 307, 308, 400, 401, 403, 404, 405, 406, 408, 413, 415, 429,
    431, 500, 501, 502, 503, 504,
];

/// Immutable mapping from status class to its ordered candidate codes.
///
/// Every list is non-empty, so resolution always has something to pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCodeTable;

impl StatusCodeTable {
    pub const fn new() -> Self {
        Self
    }

    /// Candidate codes for a class, in table order
    pub fn candidates(&self, class: StatusClass) -> &'static [u16] {
        match class {
            StatusClass::Success => SUCCESS_CODES,
            StatusClass::Redirection => REDIRECTION_CODES,
            StatusClass::ClientError => CLIENT_ERROR_CODES,
            StatusClass::ServerError => SERVER_ERROR_CODES,
            StatusClass::Random => RANDOM_CODES,
        }
    }
}

/// Picks a concrete status code uniformly at random from a class's candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCodeResolver {
    table: StatusCodeTable,
}

impl StatusCodeResolver {
    pub const fn new(table: StatusCodeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &StatusCodeTable {
        &self.table
    }

    /// Resolve using the thread-local random source
    pub fn resolve(&self, class: StatusClass) -> u16 {
        self.resolve_with(class, &mut rand::thread_rng())
    }

    /// Resolve using a caller-supplied random source
    pub fn resolve_with<R: Rng + ?Sized>(&self, class: StatusClass, rng: &mut R) -> u16 {
        let candidates = self.table.candidates(class);
        candidates[rng.gen_range(0..candidates.len())]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_table_contents() {
        let table = StatusCodeTable::new();

        assert_eq!(table.candidates(StatusClass::Success), &[200, 201, 202]);
        assert_eq!(
            table.candidates(StatusClass::Redirection),
            &[301, 302, 304, 307, 308]
        );
        assert_eq!(table.candidates(StatusClass::ClientError).len(), 11);
        assert_eq!(
            table.candidates(StatusClass::ServerError),
            &[500, 501, 502, 503, 504]
        );
    }

    #[test]
    fn test_random_is_union_of_all_classes() {
        let table = StatusCodeTable::new();
        let union: Vec<u16> = [
            StatusClass::Success,
            StatusClass::Redirection,
            StatusClass::ClientError,
            StatusClass::ServerError,
        ]
        .into_iter()
        .flat_map(|class| table.candidates(class).iter().copied())
        .collect();

        assert_eq!(table.candidates(StatusClass::Random), union.as_slice());
        assert_eq!(union.iter().collect::<HashSet<_>>().len(), 24);
    }

    #[test]
    fn test_no_class_is_empty() {
        let table = StatusCodeTable::new();

        for class in StatusClass::ALL {
            assert!(!table.candidates(class).is_empty(), "{class} has no codes");
        }
    }

    #[test]
    fn test_repeated_lookups_are_stable() {
        let table = StatusCodeTable::new();

        for class in StatusClass::ALL {
            assert_eq!(table.candidates(class), table.candidates(class));
        }
    }

    #[test]
    fn test_resolve_stays_within_class() {
        let resolver = StatusCodeResolver::default();
        let mut rng = StdRng::seed_from_u64(42);

        for class in StatusClass::ALL {
            let candidates = resolver.table().candidates(class);

            for _ in 0..500 {
                let code = resolver.resolve_with(class, &mut rng);
                assert!(candidates.contains(&code), "{code} not in {class}");
            }
        }
    }

    #[test]
    fn test_resolve_random_covers_every_code() {
        let resolver = StatusCodeResolver::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..5_000 {
            seen.insert(resolver.resolve_with(StatusClass::Random, &mut rng));
        }

        let expected: HashSet<u16> = resolver
            .table()
            .candidates(StatusClass::Random)
            .iter()
            .copied()
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_resolve_with_thread_rng() {
        let resolver = StatusCodeResolver::default();

        for _ in 0..100 {
            let code = resolver.resolve(StatusClass::ServerError);
            assert!((500..=504).contains(&code));
        }
    }

    #[test]
    fn test_every_code_is_a_valid_http_status() {
        let table = StatusCodeTable::new();

        for code in table.candidates(StatusClass::Random) {
            assert!(axum::http::StatusCode::from_u16(*code).is_ok());
        }
    }
}
