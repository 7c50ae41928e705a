//! Routes of the navigation shell

/// Top-level screens, addressed by a stable path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Accounts,
    Nft,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Accounts, Route::Nft];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Accounts => "/accounts",
            Route::Nft => "/nft",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Accounts => "Accounts",
            Route::Nft => "NFT",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Route::Home => '1',
            Route::Accounts => '2',
            Route::Nft => '3',
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn from_shortcut(key: char) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.shortcut() == key)
    }

    pub fn next(self) -> Route {
        let idx = Route::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Route::ALL[(idx + 1) % Route::ALL.len()]
    }

    pub fn previous(self) -> Route {
        let idx = Route::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Route::ALL[(idx + Route::ALL.len() - 1) % Route::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/test"), None);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(Route::Home.next(), Route::Accounts);
        assert_eq!(Route::Nft.next(), Route::Home);
        assert_eq!(Route::Home.previous(), Route::Nft);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(Route::from_shortcut('2'), Some(Route::Accounts));
        assert_eq!(Route::from_shortcut('9'), None);
    }
}
