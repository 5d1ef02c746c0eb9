use tracing::warn;

use crate::models::{Bundle, FuelConfig};

/// Storefront deep link that prefills the bundle builder.
///
/// Each pack line becomes a `product:variant:quantity` token; the comma-joined list is
/// URL-encoded into the `contents` parameter. Lines whose pack has no storefront ids are
/// skipped. With no usable lines the bare base URL is returned.
pub fn build_prefill_url(bundle: &Bundle, config: &FuelConfig) -> String {
    let base = config.meta.bundle_base_url.as_str();

    let tokens: Vec<String> = bundle
        .lines
        .iter()
        .filter(|line| line.quantity > 0)
        .filter_map(|line| {
            let ids = config
                .pack(&line.pack_key)
                .and_then(|pack| Some((pack.rc_product_id.as_deref()?, pack.rc_variant_id.as_deref()?)));
            match ids {
                Some((product, variant)) => Some(format!("{}:{}:{}", product, variant, line.quantity)),
                None => {
                    warn!(pack = %line.pack_key, "no storefront ids for pack, skipping in prefill link");
                    None
                }
            }
        })
        .collect();

    if tokens.is_empty() {
        return base.to_string();
    }
    format!("{}?contents={}", base, urlencoding::encode(&tokens.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sku, SkuMap};
    use crate::planner::bundler::bundle_packs;

    fn config() -> FuelConfig {
        FuelConfig::bundled().unwrap()
    }

    #[test]
    fn test_empty_bundle_gives_base_url() {
        let config = config();
        let bundle = bundle_packs(&SkuMap::default(), 0.0, &config);
        assert_eq!(build_prefill_url(&bundle, &config), config.meta.bundle_base_url);
    }

    #[test]
    fn test_tokens_encoded() {
        let config = config();
        let mut totals = SkuMap::default();
        totals[Sku::Gel30] = 13;
        let bundle = bundle_packs(&totals, 0.0, &config);
        let url = build_prefill_url(&bundle, &config);

        let expected = format!(
            "{}?contents=7100000005%3A4100000052%3A1%2C7100000005%3A4100000051%3A1",
            config.meta.bundle_base_url
        );
        assert_eq!(url, expected);
    }

    #[test]
    fn test_pack_without_ids_skipped() {
        let mut config = config();
        if let Some(pack) = config.packs.get_mut("GEL30_6") {
            pack.rc_variant_id = None;
        }
        let mut totals = SkuMap::default();
        totals[Sku::Gel30] = 13;
        let bundle = bundle_packs(&totals, 0.0, &config);
        let url = build_prefill_url(&bundle, &config);
        assert!(url.ends_with("?contents=7100000005%3A4100000052%3A1"));
    }
}
