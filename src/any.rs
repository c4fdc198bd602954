use alloc::string::String;
use core::{
    any::{type_name, TypeId},
    cmp::Ordering,
};

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Type name without module paths, used as the default service name.
    ///
    /// Every path segment is stripped, including the ones inside generic arguments,
    /// so `app::cache::Pool<app::db::Conn>` becomes `Pool<Conn>`.
    #[must_use]
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }
}

#[must_use]
pub(crate) fn short_type_name(full_name: &str) -> String {
    let mut short = String::with_capacity(full_name.len());
    let mut segment_start = 0;

    for (index, ch) in full_name.char_indices() {
        match ch {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                push_last_segment(&mut short, &full_name[segment_start..index]);
                short.push(ch);
                segment_start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    push_last_segment(&mut short, &full_name[segment_start..]);

    short
}

#[inline]
fn push_last_segment(short: &mut String, path: &str) {
    short.push_str(path.rsplit_once("::").map_or(path, |(_, name)| name));
}
