//! User profile and address conversion.

use velvet_outlet_core::{AddressId, UserId};

use crate::gateway::RawRecord;
use crate::schema::{self, address, user};
use crate::types::{Address, ProfileUpdate, UserProfile};

use super::coerce;

/// Convert a raw `user_c` record plus its joined addresses into a
/// [`UserProfile`].
#[must_use]
pub fn profile_from_record(record: &RawRecord, addresses: Vec<Address>) -> UserProfile {
    UserProfile {
        id: UserId::new(coerce::record_ref(record.get(schema::ID)).unwrap_or_default()),
        email: coerce::string_or_empty(record.get(user::EMAIL)),
        first_name: coerce::string_or_empty(record.get(user::FIRST_NAME)),
        last_name: coerce::string_or_empty(record.get(user::LAST_NAME)),
        phone: coerce::string_or_empty(record.get(user::PHONE)),
        created_at: coerce::timestamp(record.get(user::CREATED_AT)),
        addresses,
    }
}

/// Convert a raw `address_c` record into an [`Address`].
#[must_use]
pub fn address_from_record(record: &RawRecord) -> Address {
    Address {
        id: AddressId::new(coerce::record_ref(record.get(schema::ID)).unwrap_or_default()),
        first_name: coerce::string_or_empty(record.get(address::FIRST_NAME)),
        last_name: coerce::string_or_empty(record.get(address::LAST_NAME)),
        street: coerce::string_or_empty(record.get(address::STREET)),
        city: coerce::string_or_empty(record.get(address::CITY)),
        state: coerce::string_or_empty(record.get(address::STATE)),
        zip_code: coerce::string_or_empty(record.get(address::ZIP_CODE)),
        country: coerce::string_or_empty(record.get(address::COUNTRY)),
        is_default: coerce::bool_or_false(record.get(address::IS_DEFAULT)),
    }
}

/// Build the partial update payload for a profile edit.
///
/// Only name and phone are caller-editable; the id comes from the service's
/// own re-resolution of the current profile, never from the caller.
#[must_use]
pub fn profile_update_record(id: UserId, update: &ProfileUpdate) -> RawRecord {
    let mut record = RawRecord::new();
    record.set(schema::ID, id.as_i64());
    record.set(user::FIRST_NAME, update.first_name.as_str());
    record.set(user::LAST_NAME, update.last_name.as_str());
    record.set(user::PHONE, update.phone.clone().unwrap_or_default());
    record
}
