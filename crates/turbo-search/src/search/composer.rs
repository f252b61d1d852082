//! Composes criteria and resolved ids into one product filter.

use crate::search::{
    AppliedFilters, Filter, ProductFilter, ProductPredicate, Resolution, ResolvedFilters,
    SearchCriteria,
};

/// A composed query: the filter to run and the filters to echo back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedQuery {
    pub filter: ProductFilter,
    pub applied: AppliedFilters,
}

/// Combine every present filter of `criteria` into a conjunctive filter.
///
/// Name and variant filters use the ids in `resolved`; one that resolved to
/// no matches contributes [`ProductPredicate::Nothing`] and is still
/// reported as applied.
pub fn compose(criteria: &SearchCriteria, resolved: &ResolvedFilters) -> ComposedQuery {
    let mut composed = ComposedQuery::default();
    let filter = &mut composed.filter;

    for requested in criteria.filters() {
        composed.applied.record(&requested);
        match requested {
            Filter::Title(text) => filter.push(ProductPredicate::TextContains(text)),
            Filter::Brand(_) => push_resolved(filter, &resolved.brand, ProductPredicate::BrandIn),
            Filter::Category(_) => {
                push_resolved(filter, &resolved.category, ProductPredicate::CategoryIn)
            }
            Filter::MinPrice(min) => filter.push(ProductPredicate::PriceAtLeast(min)),
            Filter::MaxPrice(max) => filter.push(ProductPredicate::PriceAtMost(max)),
            Filter::Availability(available) => {
                filter.push(ProductPredicate::Availability(available))
            }
            Filter::Ean(ean) => filter.push(ProductPredicate::Ean(ean)),
            Filter::Mpn(mpn) => filter.push(ProductPredicate::Mpn(mpn)),
            Filter::Shop(_) => push_resolved(filter, &resolved.shop, ProductPredicate::ShopIn),
            // Color and size share one resolved id set.
            Filter::Color(_) | Filter::Size(_) => {}
        }
    }
    push_resolved(filter, &resolved.variants, ProductPredicate::IdIn);

    composed
}

fn push_resolved<Id: Clone>(
    filter: &mut ProductFilter,
    resolution: &Resolution<Id>,
    membership: fn(Vec<Id>) -> ProductPredicate,
) {
    match resolution {
        Resolution::Unfiltered => {}
        Resolution::NoMatches => filter.push(ProductPredicate::Nothing),
        Resolution::Matched(ids) => filter.push(membership(ids.clone())),
    }
}
