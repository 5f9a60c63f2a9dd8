use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Storage keys are part of the persisted layout; do not rename.
str_enum!(CollectionName {
    Professionals => "clinic_professionals",
    Patients => "clinic_patients",
    Appointments => "clinic_appointments",
});

impl CollectionName {
    pub const ALL: [CollectionName; 3] = [
        CollectionName::Professionals,
        CollectionName::Patients,
        CollectionName::Appointments,
    ];
}

str_enum!(AppointmentSortKey {
    Time => "time",
    PatientName => "patientName",
});

str_enum!(PatientSortKey {
    Name => "name",
    Email => "email",
    Phone => "phone",
});

str_enum!(SortDirection {
    Ascending => "asc",
    Descending => "desc",
});

str_enum!(UserRole {
    Admin => "ADMIN",
    Professional => "PROFESSIONAL",
});

impl Default for AppointmentSortKey {
    fn default() -> Self {
        Self::Time
    }
}

impl Default for PatientSortKey {
    fn default() -> Self {
        Self::Name
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Ascending
    }
}
