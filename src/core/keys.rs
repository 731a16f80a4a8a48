//! Built-in key sets for [`Failable`](super::Failable) and
//! [`Loadable`](crate::loadable::Loadable) values.

state_keys! {
    /// Discriminant of a [`Failable`](super::Failable).
    pub enum FailableState {
        Pending => "pending",
        Success => "success",
        Failure => "failure",
    }
}

state_keys! {
    /// Discriminant of a [`Loadable`](crate::loadable::Loadable).
    ///
    /// Each tag is a point on two axes: [`Availability`] and [`Flight`].
    pub enum LoadState {
        /// Nothing loaded, nothing in flight. Only ever the initial state.
        Empty => "empty",
        Pending => "pending",
        Success => "success",
        Reloading => "reloading",
        Failure => "failure",
        Retrying => "retrying",
    }
}

state_keys! {
    /// What a [`Loadable`](crate::loadable::Loadable) currently holds.
    pub enum Availability {
        None => "none",
        Value => "value",
        Error => "error",
    }
}

state_keys! {
    /// Whether a load is in progress.
    pub enum Flight {
        Idle => "idle",
        Busy => "busy",
    }
}

impl LoadState {
    /// The availability axis of this tag.
    pub fn availability(&self) -> Availability {
        match self {
            Self::Empty | Self::Pending => Availability::None,
            Self::Success | Self::Reloading => Availability::Value,
            Self::Failure | Self::Retrying => Availability::Error,
        }
    }

    /// The flight axis of this tag.
    pub fn flight(&self) -> Flight {
        match self {
            Self::Empty | Self::Success | Self::Failure => Flight::Idle,
            Self::Pending | Self::Reloading | Self::Retrying => Flight::Busy,
        }
    }

    /// Rebuild a tag from its two axes.
    pub fn from_axes(availability: Availability, flight: Flight) -> Self {
        match (availability, flight) {
            (Availability::None, Flight::Idle) => Self::Empty,
            (Availability::None, Flight::Busy) => Self::Pending,
            (Availability::Value, Flight::Idle) => Self::Success,
            (Availability::Value, Flight::Busy) => Self::Reloading,
            (Availability::Error, Flight::Idle) => Self::Failure,
            (Availability::Error, Flight::Busy) => Self::Retrying,
        }
    }

    /// True for the three busy tags.
    pub fn is_loading(&self) -> bool {
        self.flight() == Flight::Busy
    }

    /// The tag reached by beginning a load from this tag.
    ///
    /// Busy tags map to themselves.
    pub fn loading(&self) -> Self {
        Self::from_axes(self.availability(), Flight::Busy)
    }
}

impl From<FailableState> for LoadState {
    fn from(state: FailableState) -> Self {
        match state {
            FailableState::Pending => Self::Pending,
            FailableState::Success => Self::Success,
            FailableState::Failure => Self::Failure,
        }
    }
}
