use std::fmt;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn next_value<T>(it: &mut std::slice::Iter<'_, std::string::String>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit(format!("{}: value missing", opt)));
    n.parse()
        .unwrap_or_else(|e| error_exit(format!("{}: {} '{}'", opt, e, n)))
}

pub fn error_exit<T: fmt::Display, U>(t: T) -> U {
    crate::error!("{}", t);
    std::process::exit(1);
}

pub fn unixtime_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn write_to_file(file_path: &str, data: &str) -> Res {
    use std::io::Write;
    let path = std::path::Path::new(file_path);
    let prefix = path.parent().ok_or("invalid path")?;
    std::fs::create_dir_all(prefix)?;
    let mut f = std::fs::File::create(path)?;
    write!(f, "{}", data)?;
    Ok(())
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

// 最も数字の大きい値のindexから順に格納した配列を返却
// 同じ値が複数ある場合, 先に入っていた要素のindexが先になる
pub fn rank_by_index_vec<T: Ord + Clone>(v: &[T]) -> Vec<usize> {
    let mut i_n: Vec<(usize, &T)> = v.iter().enumerate().collect();
    i_n.sort_by(|a, b| {
        if a.1 != b.1 {
            b.1.cmp(a.1)
        } else {
            a.0.cmp(&b.0)
        }
    });
    i_n.iter().map(|e| e.0).collect()
}

#[test]
fn test_rank_by_index_vec() {
    assert_eq!(rank_by_index_vec(&[10, 40, 20, 30]), vec![1, 3, 2, 0]);
    // 同点は先に入っていた要素(=座席番号の小さい方)が上位
    assert_eq!(rank_by_index_vec(&[20, 30, 30, 10]), vec![1, 2, 0, 3]);
}
