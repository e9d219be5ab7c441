#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Events,
    Clubs,
    Profile,
    SignIn,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Events => "/events",
            Route::Clubs => "/clubs",
            Route::Profile => "/profile",
            Route::SignIn => "/auth",
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

pub mod in_memory;
