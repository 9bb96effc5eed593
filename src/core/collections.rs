use crate::core::{Product, RatedItem};

/// Lowest rating that passes [`filter_by_rating`].
pub const MIN_RATING: f64 = 4.0;

pub fn filter_by_rating(items: &[RatedItem]) -> Vec<RatedItem> {
    items
        .iter()
        .filter(|item| item.rating >= MIN_RATING)
        .cloned()
        .collect()
}

/// Joins any number of sequences, in order.
pub fn concatenate_arrays<T, I>(arrays: I) -> Vec<T>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = T>,
{
    arrays.into_iter().flatten().collect()
}

/// The highest-priced product. On a tie the later product wins.
pub fn most_expensive_product(products: &[Product]) -> Option<&Product> {
    products
        .iter()
        .reduce(|max, product| if max.price > product.price { max } else { product })
}
